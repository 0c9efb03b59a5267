//! Registry build step: per-item public manifests and manifest checks.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Item, Manifest, ManifestIssue, PublicItem};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Item name '{0}' cannot be used as a file name")]
    InvalidName(String),
}

pub fn public_item(item: &Item) -> PublicItem {
    PublicItem::from(item)
}

/// Write `{out_dir}/{name}.json` for every item. Returns the written paths in
/// manifest order.
///
/// Duplicate names overwrite each other; run [`check_manifest`] first to catch
/// them.
pub fn write_public_manifests(
    manifest: &Manifest,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, BuildError> {
    std::fs::create_dir_all(out_dir).map_err(|source| BuildError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(manifest.items.len());
    for item in &manifest.items {
        if item.name.is_empty() || item.name.contains(['/', '\\']) || item.name.starts_with('.') {
            return Err(BuildError::InvalidName(item.name.clone()));
        }

        let json = serde_json::to_string_pretty(&public_item(item)).map_err(|source| {
            BuildError::Serialize {
                name: item.name.clone(),
                source,
            }
        })?;

        let path = out_dir.join(format!("{}.json", item.name));
        std::fs::write(&path, json + "\n").map_err(|source| BuildError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Data-quality problems that lookups silently tolerate.
pub fn check_manifest(manifest: &Manifest) -> Vec<ManifestIssue> {
    manifest.validate()
}
