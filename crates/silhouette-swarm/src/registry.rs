//! AgentRegistry — power presets, category toggles, and the stochastic tick

use crate::roster::{build_roster, WorkerCategory, WorkerRecord, WorkerStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::info;

/// Named category bundles, ordered from core-only to everything.
/// `Custom` leaves the active set untouched; manual toggles force it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerPreset {
    Eco,
    Balanced,
    Performance,
    Ultra,
    Custom,
}

impl PowerPreset {
    /// Categories activated by this preset, beyond the always-on core.
    /// `None` for `Custom`: the active set is controlled manually.
    fn categories(self) -> Option<&'static [WorkerCategory]> {
        match self {
            PowerPreset::Eco => Some(&[]),
            PowerPreset::Balanced => Some(&[WorkerCategory::Dev, WorkerCategory::Support]),
            PowerPreset::Performance => Some(&[
                WorkerCategory::Dev,
                WorkerCategory::Support,
                WorkerCategory::Research,
                WorkerCategory::Analytics,
            ]),
            PowerPreset::Ultra => Some(&WorkerCategory::ALL),
            PowerPreset::Custom => None,
        }
    }
}

struct SwarmState {
    workers: Vec<WorkerRecord>,
    active: HashSet<WorkerCategory>,
    preset: PowerPreset,
    rng: StdRng,
}

pub struct AgentRegistry {
    state: Mutex<SwarmState>,
}

impl AgentRegistry {
    /// Registry with entropy-seeded randomness, booted in Eco.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Registry with a fixed seed, for deterministic tick sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let registry = Self {
            state: Mutex::new(SwarmState {
                workers: build_roster(),
                active: HashSet::new(),
                preset: PowerPreset::Eco,
                rng,
            }),
        };
        registry.apply_power_preset(PowerPreset::Eco);
        registry
    }

    /// Replace the active-category set with the preset's bundle and
    /// recompute every worker's enablement. `Custom` only records itself.
    pub fn apply_power_preset(&self, preset: PowerPreset) {
        let mut state = self.lock();
        state.preset = preset;

        if let Some(extra) = preset.categories() {
            state.active.clear();
            state.active.insert(WorkerCategory::Core);
            state.active.extend(extra.iter().copied());
        }

        Self::recompute(&mut state);
        info!(
            "power preset {:?}: {} workers active",
            preset,
            state.workers.iter().filter(|w| w.enabled).count()
        );
    }

    /// Manual category override. Forces the preset to `Custom`.
    pub fn toggle_category(&self, category: WorkerCategory, on: bool) {
        let mut state = self.lock();
        state.preset = PowerPreset::Custom;
        if on {
            state.active.insert(category);
        } else {
            state.active.remove(&category);
        }
        Self::recompute(&mut state);
    }

    /// One simulation step: enabled workers drift through the
    /// idle → thinking → working → idle cycle with per-status CPU bands.
    pub fn tick(&self) {
        let mut guard = self.lock();
        let state = &mut *guard;
        for worker in state.workers.iter_mut().filter(|w| w.enabled) {
            let rng = &mut state.rng;
            match worker.status {
                WorkerStatus::Idle => {
                    if rng.gen_bool(0.25) {
                        worker.status = WorkerStatus::Thinking;
                        worker.cpu_usage = rng.gen_range(20.0..50.0);
                    } else {
                        worker.cpu_usage = rng.gen_range(2.0..8.0);
                    }
                }
                WorkerStatus::Thinking => {
                    if rng.gen_bool(0.3) {
                        worker.status = WorkerStatus::Working;
                        worker.cpu_usage = rng.gen_range(50.0..95.0);
                    }
                }
                WorkerStatus::Working => {
                    if rng.gen_bool(0.2) {
                        worker.status = WorkerStatus::Idle;
                        worker.cpu_usage = rng.gen_range(5.0..15.0);
                    }
                }
                WorkerStatus::Offline => {}
            }
            worker.ram_usage = (worker.ram_usage + rng.gen_range(-15.0..15.0)).max(120.0);
        }
    }

    pub fn active_count(&self) -> usize {
        self.lock().workers.iter().filter(|w| w.enabled).count()
    }

    /// Total RAM across the roster. Disabled workers contribute zero.
    pub fn total_ram(&self) -> f64 {
        self.lock().workers.iter().map(|w| w.ram_usage).sum()
    }

    pub fn preset(&self) -> PowerPreset {
        self.lock().preset
    }

    pub fn snapshot(&self) -> Vec<WorkerRecord> {
        self.lock().workers.clone()
    }

    /// Reconcile every worker against the active-category set.
    /// Entering workers boot to idle with a baseline RAM cost; leaving
    /// workers go offline with zeroed usage.
    fn recompute(state: &mut SwarmState) {
        for worker in state.workers.iter_mut() {
            let should_run = state.active.contains(&worker.category);
            if should_run && !worker.enabled {
                worker.enabled = true;
                worker.status = WorkerStatus::Idle;
                worker.cpu_usage = 0.0;
                worker.ram_usage = state.rng.gen_range(180.0..420.0);
            } else if !should_run && worker.enabled {
                worker.enabled = false;
                worker.status = WorkerStatus::Offline;
                worker.cpu_usage = 0.0;
                worker.ram_usage = 0.0;
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SwarmState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
