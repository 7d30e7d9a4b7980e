//! Silhouette Memory - the tiered continuum store
//!
//! Records live in one of five retention tiers. The fastest tier is a
//! capped in-memory list that consolidates under pressure; the two slowest
//! tiers persist to a single durable JSON slot, newest-first, capped at 100.

pub mod record;
pub mod slot;
pub mod store;

pub use record::{importance_of, MemoryRecord, MemoryTier};
pub use slot::{DurableSlot, CONTINUUM_SLOT_KEY};
pub use store::{ContinuumMemory, MemoryStats, DURABLE_CAP, VOLATILE_CAP, VOLATILE_KEEP};
