//! Filesystem handlers — scan, confinement, backups, rollback
//!
//! All paths resolve relative to the workspace root and must stay inside
//! it. Writes against the protected denylist need an explicit override.

use chrono::Utc;
use silhouette_core::{Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Paths that refuse writes without `forceOverride`.
pub const PROTECTED_PATHS: &[&str] = &[
    "Cargo.toml",
    "src/main.rs",
    ".env",
    "silhouette.json",
];

const SKIP_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "target"];

const SOURCE_EXTENSIONS: &[&str] = &[
    "rs", "ts", "tsx", "js", "jsx", "json", "toml", "md", "css", "html",
];

const MAX_SCAN_DEPTH: usize = 5;

pub fn is_protected(path: &str) -> bool {
    PROTECTED_PATHS.iter().any(|p| *p == path)
}

/// Resolve a request path against the workspace root. Absolute paths and
/// parent traversal are rejected outright.
pub fn resolve_workspace_path(root: &Path, relative: &str) -> Result<PathBuf> {
    let candidate = Path::new(relative);
    if candidate.is_absolute() {
        return Err(Error::ProtectedPath(relative.to_string()));
    }
    for component in candidate.components() {
        if matches!(component, Component::ParentDir) {
            return Err(Error::ProtectedPath(relative.to_string()));
        }
    }
    Ok(root.join(candidate))
}

/// Recursively list source-like files under the root, depth-limited,
/// skipping dependency and VCS directories. Paths come back relative.
pub fn scan_source_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .max_depth(MAX_SCAN_DEPTH)
        .into_iter()
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| !SKIP_DIRS.contains(&name))
                .unwrap_or(true)
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| SOURCE_EXTENSIONS.contains(&e))
                .unwrap_or(false)
        })
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(|p| p.to_string_lossy().to_string())
        })
        .collect();
    files.sort();
    files
}

/// Copy the target to a timestamp-suffixed sibling before overwriting.
/// Returns the backup file name, or `None` when the target is new.
pub fn backup_file(target: &Path) -> Result<Option<String>> {
    if !target.exists() {
        return Ok(None);
    }

    let file_name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::Internal(format!("unnameable path: {}", target.display())))?;
    let backup_name = format!(
        "{}.backup-{}",
        file_name,
        Utc::now().format("%Y%m%d%H%M%S%3f")
    );
    let backup_path = target.with_file_name(&backup_name);

    fs::copy(target, &backup_path)?;
    debug!("backup: {} -> {}", target.display(), backup_name);
    Ok(Some(backup_name))
}

/// Copy a named backup back over its target. The backup id is a bare file
/// name; anything path-like is rejected.
pub fn rollback_file(root: &Path, relative: &str, backup_id: &str) -> Result<()> {
    if backup_id.contains('/') || backup_id.contains('\\') {
        return Err(Error::ProtectedPath(backup_id.to_string()));
    }

    let target = resolve_workspace_path(root, relative)?;
    let backup_path = target.with_file_name(backup_id);
    if !backup_path.exists() {
        return Err(Error::not_found(format!("backup {}", backup_id)));
    }

    fs::copy(&backup_path, &target)?;
    debug!("rollback: {} <- {}", target.display(), backup_id);
    Ok(())
}
