//! ContinuumMemory — tiered store with consolidation under pressure
//!
//! Tier routing:
//! - `Sensory` → volatile list, newest first, capped at [`VOLATILE_CAP`]
//! - `Working`/`Episodic` → session list, in-memory for the process lifetime
//! - `Semantic`/`Procedural` → durable slot, wholesale rewrite per store
//!
//! Overflowing the volatile cap triggers a consolidation pass: records with
//! importance above the promotion threshold are copied into the semantic
//! tier and persisted, then the volatile list is truncated to its newest
//! [`VOLATILE_KEEP`] entries regardless of what was promoted.

use crate::record::{MemoryRecord, MemoryTier};
use crate::slot::{DurableSlot, CONTINUUM_SLOT_KEY};
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};

pub const VOLATILE_CAP: usize = 50;
pub const VOLATILE_KEEP: usize = 20;
pub const DURABLE_CAP: usize = 100;

const RETRIEVE_LIMIT: usize = 10;
const PROMOTE_THRESHOLD: f64 = 0.7;

/// Observability counters for the store.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct MemoryStats {
    pub volatile_count: usize,
    pub durable_count: usize,
}

struct TierState {
    volatile: Vec<MemoryRecord>,
    session: Vec<MemoryRecord>,
}

pub struct ContinuumMemory {
    state: Mutex<TierState>,
    slot: DurableSlot,
}

impl ContinuumMemory {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            state: Mutex::new(TierState {
                volatile: Vec::new(),
                session: Vec::new(),
            }),
            slot: DurableSlot::new(data_dir, CONTINUUM_SLOT_KEY),
        }
    }

    /// Store a record. Side effect only: durable write failures are logged
    /// and swallowed, so the caller always sees the record as stored.
    pub fn store(&self, content: impl Into<String>, tier: MemoryTier, tags: Vec<String>) {
        let record = MemoryRecord::new(content, tier, tags);
        debug!(
            "store: tier={} importance={:.2} len={}",
            tier,
            record.importance,
            record.content.len()
        );

        if tier.is_durable() {
            self.persist_durable(record);
            return;
        }

        let mut state = self.lock();
        match tier {
            MemoryTier::Sensory => {
                state.volatile.insert(0, record);
                if state.volatile.len() > VOLATILE_CAP {
                    self.consolidate(&mut state);
                }
            }
            _ => state.session.push(record),
        }
    }

    /// Case-insensitive substring/tag retrieval across all tiers,
    /// newest first, capped at 10. Matched in-memory records get their
    /// access bookkeeping bumped.
    pub fn retrieve(&self, query: &str) -> Vec<MemoryRecord> {
        let needle = query.to_lowercase();
        let mut results = Vec::new();

        {
            let mut guard = self.lock();
            let state = &mut *guard;
            for record in state.volatile.iter_mut().chain(state.session.iter_mut()) {
                if record.matches(&needle) {
                    record.touch();
                    results.push(record.clone());
                }
            }
        }

        results.extend(self.slot.load().into_iter().filter(|r| r.matches(&needle)));

        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        results.truncate(RETRIEVE_LIMIT);
        results
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            volatile_count: self.lock().volatile.len(),
            durable_count: self.slot.load().len(),
        }
    }

    /// Promote high-importance volatile records, then truncate the volatile
    /// list to its newest entries. The truncation is blunt: promotion copies
    /// a record rather than moving it, and unpromoted older records are
    /// simply dropped.
    fn consolidate(&self, state: &mut TierState) {
        let promoted: Vec<MemoryRecord> = state
            .volatile
            .iter()
            .filter(|r| r.importance > PROMOTE_THRESHOLD)
            .map(|r| {
                let mut copy = r.clone();
                copy.tier = MemoryTier::Semantic;
                copy
            })
            .collect();

        let count = promoted.len();
        for record in promoted {
            self.persist_durable(record);
        }

        state.volatile.truncate(VOLATILE_KEEP);
        info!(
            "consolidation: promoted={} volatile_now={}",
            count,
            state.volatile.len()
        );
    }

    /// Durable write path: load the full set, prepend, sort by recency,
    /// keep the newest [`DURABLE_CAP`], rewrite wholesale.
    fn persist_durable(&self, record: MemoryRecord) {
        let mut records = self.slot.load();
        records.insert(0, record);
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(DURABLE_CAP);

        if let Err(e) = self.slot.save(&records) {
            warn!("durable store write failed, record kept in memory only: {}", e);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TierState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}
