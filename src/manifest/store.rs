use std::sync::{Arc, RwLock};

use super::{load, ManifestError, ManifestSource};
use crate::models::Manifest;

/// Shared handle to the current manifest.
///
/// Readers get an `Arc` snapshot; a reload swaps the whole manifest. A loaded
/// manifest is never modified in place.
#[derive(Clone, Default)]
pub struct ManifestStore {
    current: Arc<RwLock<Option<Arc<Manifest>>>>,
}

impl ManifestStore {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            current: Arc::new(RwLock::new(Some(Arc::new(manifest)))),
        }
    }

    /// A store with nothing loaded yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<Manifest>> {
        self.current.read().expect("manifest lock poisoned").clone()
    }

    pub fn replace(&self, manifest: Manifest) -> Arc<Manifest> {
        let manifest = Arc::new(manifest);
        *self.current.write().expect("manifest lock poisoned") = Some(manifest.clone());
        manifest
    }

    /// Load from `source` and swap it in. On failure the previous manifest
    /// stays in place.
    pub async fn reload(&self, source: &ManifestSource) -> Result<Arc<Manifest>, ManifestError> {
        let manifest = load(source).await?;
        tracing::info!(
            "Manifest reloaded: {}@{} ({} items)",
            manifest.name,
            manifest.version,
            manifest.items.len()
        );
        Ok(self.replace(manifest))
    }
}
