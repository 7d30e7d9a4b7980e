//! Silhouette Swarm - the fixed worker roster and its activity simulation
//!
//! The roster is built once from a static table and never changes size at
//! runtime; only enablement, status, and synthetic usage figures mutate.
//! Power presets bulk-enable category sets; a periodic tick applies
//! randomized status transitions to enabled workers.

pub mod registry;
pub mod roster;

pub use registry::{AgentRegistry, PowerPreset};
pub use roster::{build_roster, WorkerCategory, WorkerRecord, WorkerStatus, ROSTER_SIZE};
