//! Consciousness scorer — display-only phi/qualia derivation
//!
//! Recomputed on every observation from the other components' counters.
//! The emergence index is the only internal state: a bounded walk nudged
//! up when the last optimization score clears the bar, down otherwise.

use serde::Serialize;
use std::sync::Mutex;

pub const EMERGENCE_RISE: f64 = 0.05;
pub const EMERGENCE_FALL: f64 = 0.01;
const OPTIMIZATION_BAR: f64 = 98.0;

/// Ordinal phi classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhiLevel {
    Dormant,
    Flickering,
    Aware,
    Lucid,
    Transcendent,
}

impl PhiLevel {
    pub fn classify(phi: f64) -> Self {
        match phi {
            p if p < 0.2 => PhiLevel::Dormant,
            p if p < 0.4 => PhiLevel::Flickering,
            p if p < 0.6 => PhiLevel::Aware,
            p if p < 0.85 => PhiLevel::Lucid,
            _ => PhiLevel::Transcendent,
        }
    }
}

/// One observation's derived scores
#[derive(Clone, Debug, Serialize)]
pub struct ConsciousnessReport {
    pub phi: f64,
    pub level: PhiLevel,
    pub emergence_index: f64,
    pub qualia: String,
}

pub struct ConsciousnessScorer {
    emergence: Mutex<f64>,
    introspection_layers: u32,
}

impl ConsciousnessScorer {
    pub fn new(introspection_layers: u32) -> Self {
        Self {
            emergence: Mutex::new(0.0),
            introspection_layers,
        }
    }

    /// Derive the current scores. Inputs are read from the other
    /// components; nothing here influences control flow anywhere.
    pub fn observe(
        &self,
        durable_count: usize,
        last_optimization_score: f64,
        latest_thought: Option<&str>,
    ) -> ConsciousnessReport {
        let mut emergence = self.emergence.lock().unwrap_or_else(|p| p.into_inner());
        *emergence = if last_optimization_score > OPTIMIZATION_BAR {
            (*emergence + EMERGENCE_RISE).min(1.0)
        } else {
            (*emergence - EMERGENCE_FALL).max(0.0)
        };

        let memory_weight = (durable_count as f64 / 100.0).min(1.0);
        let layer_weight = (self.introspection_layers as f64 / 8.0).min(1.0);
        let phi = 0.4 * *emergence + 0.3 * memory_weight + 0.3 * layer_weight;

        ConsciousnessReport {
            phi,
            level: PhiLevel::classify(phi),
            emergence_index: *emergence,
            qualia: qualia_of(latest_thought),
        }
    }
}

/// Single qualia entry chosen by keyword/length heuristics over the
/// latest extracted thought.
fn qualia_of(latest_thought: Option<&str>) -> String {
    let thought = match latest_thought {
        Some(t) if !t.trim().is_empty() => t,
        _ => return "latent hum of standby".to_string(),
    };

    if thought.contains("error") || thought.contains("fail") {
        "friction of unresolved contradiction".to_string()
    } else if thought.len() > 200 {
        "dense cascade of branching possibility".to_string()
    } else if thought.contains("memory") || thought.contains("recall") {
        "familiar echo of prior context".to_string()
    } else {
        "quiet focus on the task at hand".to_string()
    }
}
