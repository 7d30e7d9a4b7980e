//! Durable slot — wholesale JSON persistence for the slow tiers
//!
//! One fixed key maps to one JSON file holding the full record array.
//! Every write rewrites the file; the store layer enforces the cap before
//! saving. Loads are tolerant: a missing or unreadable slot reads as empty.

use crate::record::MemoryRecord;
use silhouette_core::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Slot key for the continuum's durable tiers.
pub const CONTINUUM_SLOT_KEY: &str = "silhouette-continuum";

pub struct DurableSlot {
    path: PathBuf,
}

impl DurableSlot {
    pub fn new(data_dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full record set. Missing file → empty; parse failure is
    /// logged and reads as empty rather than wedging the store.
    pub fn load(&self) -> Vec<MemoryRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!("durable slot {} unreadable: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with the given record set.
    pub fn save(&self, records: &[MemoryRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MemoryTier;

    #[test]
    fn missing_slot_loads_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let slot = DurableSlot::new(dir.path(), "absent");
        assert!(slot.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let slot = DurableSlot::new(dir.path(), CONTINUUM_SLOT_KEY);

        let records = vec![MemoryRecord::new("kept", MemoryTier::Semantic, vec![])];
        slot.save(&records).unwrap();

        let loaded = slot.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].content, "kept");
        assert_eq!(loaded[0].tier, MemoryTier::Semantic);
    }

    #[test]
    fn corrupt_slot_loads_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let slot = DurableSlot::new(dir.path(), CONTINUUM_SLOT_KEY);
        fs::write(slot.path(), "{broken").unwrap();
        assert!(slot.load().is_empty());
    }
}
