//! Silhouette config — serde structs for ~/.silhouette/silhouette.json
//!
//! Pure types and parsing only. Env overrides are applied by the binary.

use crate::error::{Error, Result};
use crate::types::{GatewayConfig, WorkflowConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SilhouetteConfig {
    pub gateway: GatewayConfig,
    pub workflow: WorkflowConfig,
    pub data_dir: Option<PathBuf>,
    pub workspace: Option<PathBuf>,
    pub model: Option<String>,
}

impl SilhouetteConfig {
    /// Default config file location: `~/.silhouette/silhouette.json`.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".silhouette")
                .join("silhouette.json")
        })
    }

    /// Load from an explicit path, or the default location.
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Resolved data directory: configured, or `~/.silhouette/data`.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".silhouette").join("data"),
            None => PathBuf::from(".silhouette-data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = SilhouetteConfig::load(Some(&dir.path().join("nope.json"))).unwrap();
        assert!(!config.workflow.enabled);
        assert_eq!(config.gateway.port, 7717);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("silhouette.json");
        std::fs::write(
            &path,
            r#"{"gateway": {"port": 9000}, "workflow": {"enabled": true}}"#,
        )
        .unwrap();

        let config = SilhouetteConfig::load(Some(&path)).unwrap();
        assert_eq!(config.gateway.port, 9000);
        assert!(config.workflow.enabled);
        assert!(config.workflow.continuous);
        assert_eq!(config.workflow.max_daily_tokens, 250_000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("silhouette.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(SilhouetteConfig::load(Some(&path)).is_err());
    }
}
