//! Integration tests for silhouette-swarm
//!
//! Validates preset semantics, the enablement invariant, manual toggles,
//! and deterministic tick sequences under a fixed seed.

use silhouette_swarm::{AgentRegistry, PowerPreset, WorkerCategory, WorkerStatus, ROSTER_SIZE};

// ============================================================
// Presets
// ============================================================

#[test]
fn eco_enables_only_core() {
    let registry = AgentRegistry::with_seed(1);
    registry.apply_power_preset(PowerPreset::Eco);

    for worker in registry.snapshot() {
        assert_eq!(
            worker.enabled,
            worker.category == WorkerCategory::Core,
            "{}",
            worker.id
        );
    }
}

#[test]
fn ultra_enables_everyone() {
    let registry = AgentRegistry::with_seed(1);
    registry.apply_power_preset(PowerPreset::Ultra);

    assert_eq!(registry.active_count(), ROSTER_SIZE);
}

#[test]
fn balanced_activates_core_dev_support() {
    let registry = AgentRegistry::with_seed(1);
    registry.apply_power_preset(PowerPreset::Balanced);

    for worker in registry.snapshot() {
        let expected = matches!(
            worker.category,
            WorkerCategory::Core | WorkerCategory::Dev | WorkerCategory::Support
        );
        assert_eq!(worker.enabled, expected, "{}", worker.id);
    }

    let marketing_off = registry
        .snapshot()
        .into_iter()
        .filter(|w| w.category == WorkerCategory::Marketing)
        .all(|w| !w.enabled);
    assert!(marketing_off);
}

#[test]
fn disabled_workers_are_offline_and_zeroed() {
    let registry = AgentRegistry::with_seed(7);
    for preset in [
        PowerPreset::Eco,
        PowerPreset::Balanced,
        PowerPreset::Performance,
        PowerPreset::Ultra,
        PowerPreset::Eco,
    ] {
        registry.apply_power_preset(preset);
        for worker in registry.snapshot() {
            if !worker.enabled {
                assert_eq!(worker.status, WorkerStatus::Offline);
                assert_eq!(worker.cpu_usage, 0.0);
                assert_eq!(worker.ram_usage, 0.0);
            }
        }
    }
}

#[test]
fn enabling_boots_idle_with_baseline_ram() {
    let registry = AgentRegistry::with_seed(3);
    registry.apply_power_preset(PowerPreset::Ultra);

    for worker in registry.snapshot() {
        assert!(worker.enabled);
        assert_eq!(worker.status, WorkerStatus::Idle);
        assert!(worker.ram_usage > 0.0, "{} has no boot RAM", worker.id);
    }
}

#[test]
fn custom_preset_leaves_active_set_untouched() {
    let registry = AgentRegistry::with_seed(1);
    registry.apply_power_preset(PowerPreset::Balanced);
    let before = registry.active_count();

    registry.apply_power_preset(PowerPreset::Custom);
    assert_eq!(registry.active_count(), before);
    assert_eq!(registry.preset(), PowerPreset::Custom);
}

// ============================================================
// Manual toggles
// ============================================================

#[test]
fn toggle_forces_custom_and_flips_one_category() {
    let registry = AgentRegistry::with_seed(1);
    registry.apply_power_preset(PowerPreset::Eco);

    registry.toggle_category(WorkerCategory::Marketing, true);
    assert_eq!(registry.preset(), PowerPreset::Custom);

    let snapshot = registry.snapshot();
    assert!(snapshot
        .iter()
        .filter(|w| w.category == WorkerCategory::Marketing)
        .all(|w| w.enabled));
    assert!(snapshot
        .iter()
        .filter(|w| w.category == WorkerCategory::Dev)
        .all(|w| !w.enabled));

    registry.toggle_category(WorkerCategory::Marketing, false);
    assert!(registry
        .snapshot()
        .iter()
        .filter(|w| w.category == WorkerCategory::Marketing)
        .all(|w| !w.enabled));
}

// ============================================================
// Tick
// ============================================================

#[test]
fn tick_only_touches_enabled_workers() {
    let registry = AgentRegistry::with_seed(42);
    registry.apply_power_preset(PowerPreset::Eco);

    for _ in 0..20 {
        registry.tick();
    }

    for worker in registry.snapshot() {
        if worker.enabled {
            assert_ne!(worker.status, WorkerStatus::Offline);
        } else {
            assert_eq!(worker.status, WorkerStatus::Offline);
            assert_eq!(worker.cpu_usage, 0.0);
        }
    }
}

#[test]
fn tick_is_deterministic_under_a_fixed_seed() {
    let a = AgentRegistry::with_seed(42);
    let b = AgentRegistry::with_seed(42);
    a.apply_power_preset(PowerPreset::Ultra);
    b.apply_power_preset(PowerPreset::Ultra);

    for _ in 0..10 {
        a.tick();
        b.tick();
    }

    let sa = a.snapshot();
    let sb = b.snapshot();
    for (wa, wb) in sa.iter().zip(sb.iter()) {
        assert_eq!(wa.status, wb.status, "{}", wa.id);
        assert_eq!(wa.cpu_usage, wb.cpu_usage, "{}", wa.id);
        assert_eq!(wa.ram_usage, wb.ram_usage, "{}", wa.id);
    }
}

#[test]
fn tick_eventually_cycles_statuses() {
    let registry = AgentRegistry::with_seed(9);
    registry.apply_power_preset(PowerPreset::Ultra);

    let mut seen_thinking = false;
    let mut seen_working = false;
    for _ in 0..100 {
        registry.tick();
        for worker in registry.snapshot() {
            match worker.status {
                WorkerStatus::Thinking => seen_thinking = true,
                WorkerStatus::Working => seen_working = true,
                _ => {}
            }
        }
    }
    assert!(seen_thinking && seen_working);
}

// ============================================================
// Aggregates
// ============================================================

#[test]
fn total_ram_counts_only_enabled_workers() {
    let registry = AgentRegistry::with_seed(5);
    registry.apply_power_preset(PowerPreset::Eco);
    let eco_ram = registry.total_ram();
    assert!(eco_ram > 0.0);

    registry.apply_power_preset(PowerPreset::Ultra);
    assert!(registry.total_ram() > eco_ram);

    // Everything off: no enabled workers, no RAM.
    for category in WorkerCategory::ALL {
        registry.toggle_category(category, false);
    }
    assert_eq!(registry.active_count(), 0);
    assert_eq!(registry.total_ram(), 0.0);
}
