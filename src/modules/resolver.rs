use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{
    companion_path, companion_stem, CompanionKind, CompanionSuffixes, ModuleIndex,
    ResolvedModule,
};

type CacheKey = (String, String);

/// Resolves item companions against a [`ModuleIndex`] and caches the results.
///
/// Cheap to clone; clones share the index and the cache. Concurrent misses for
/// the same key are not deduplicated: both run the chain and the last write
/// wins, which is harmless because both derive from the same index.
#[derive(Clone)]
pub struct ModuleResolver {
    index: Arc<ModuleIndex>,
    suffixes: CompanionSuffixes,
    cache: Arc<Mutex<HashMap<CacheKey, Arc<ResolvedModule>>>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub cached: usize,
    pub indexed: usize,
}

impl ModuleResolver {
    pub fn new(index: ModuleIndex, suffixes: CompanionSuffixes) -> Self {
        Self {
            index: Arc::new(index),
            suffixes,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn index(&self) -> &ModuleIndex {
        &self.index
    }

    pub fn suffixes(&self) -> &CompanionSuffixes {
        &self.suffixes
    }

    /// Resolve the `kind` companion of `source_path` for item `identifier`.
    pub fn resolve(
        &self,
        identifier: &str,
        source_path: &str,
        kind: CompanionKind,
    ) -> Arc<ResolvedModule> {
        let path = companion_path(source_path, self.suffixes.for_kind(kind));
        let key = (identifier.to_string(), path);

        if let Some(hit) = self.cache.lock().expect("module cache lock poisoned").get(&key) {
            return hit.clone();
        }

        let resolved = Arc::new(self.run_chain(identifier, &key.1, kind));
        match resolved.as_ref() {
            ResolvedModule::Found { path, export, .. } => {
                tracing::debug!("Resolved {} {} to {}#{}", identifier, kind.as_str(), path, export)
            }
            ResolvedModule::NotFound { attempted, known } => tracing::debug!(
                "No {} module for {} at {} ({} indexed)",
                kind.as_str(),
                identifier,
                attempted,
                known.len()
            ),
            ResolvedModule::Failed { path, message } => {
                tracing::warn!("Loading {} for {} failed: {}", path, identifier, message)
            }
        }

        self.cache
            .lock()
            .expect("module cache lock poisoned")
            .insert(key, resolved.clone());
        resolved
    }

    /// [`resolve`](Self::resolve) for async callers. Cache hits return
    /// immediately; misses run on the blocking pool since loaders read files.
    pub async fn resolve_async(
        &self,
        identifier: &str,
        source_path: &str,
        kind: CompanionKind,
    ) -> Arc<ResolvedModule> {
        let path = companion_path(source_path, self.suffixes.for_kind(kind));
        let key = (identifier.to_string(), path);
        let hit = self
            .cache
            .lock()
            .expect("module cache lock poisoned")
            .get(&key)
            .cloned();
        if let Some(hit) = hit {
            return hit;
        }

        let resolver = self.clone();
        let (identifier, path) = key;
        let id = identifier.clone();
        let source = source_path.to_string();
        match tokio::task::spawn_blocking(move || resolver.resolve(&id, &source, kind)).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::error!("Resolver task for {} failed: {}", identifier, e);
                Arc::new(ResolvedModule::Failed {
                    path,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Drop every cached result for `identifier`. Returns how many were dropped.
    pub fn source_changed(&self, identifier: &str) -> usize {
        let mut cache = self.cache.lock().expect("module cache lock poisoned");
        let before = cache.len();
        cache.retain(|(id, _), _| id != identifier);
        let dropped = before - cache.len();
        tracing::debug!("Invalidated {} cached modules for {}", dropped, identifier);
        dropped
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            cached: self.cache.lock().expect("module cache lock poisoned").len(),
            indexed: self.index.len(),
        }
    }

    fn run_chain(&self, identifier: &str, path: &str, kind: CompanionKind) -> ResolvedModule {
        let suffix = self.suffixes.for_kind(kind);

        let matched = self
            .index
            .get(path)
            .map(|loader| (path, loader))
            .or_else(|| {
                self.index
                    .iter()
                    .find(|(candidate, _)| companion_stem(candidate, suffix) == Some(identifier))
            });

        let Some((matched_path, loader)) = matched else {
            return self.not_found(path);
        };

        match catch_unwind(AssertUnwindSafe(|| loader())) {
            Ok(Ok(exports)) => match exports.preferred() {
                Some((export, content)) => ResolvedModule::Found {
                    path: matched_path.to_string(),
                    export: export.to_string(),
                    content: content.clone(),
                },
                None => self.not_found(path),
            },
            Ok(Err(e)) => ResolvedModule::Failed {
                path: matched_path.to_string(),
                message: e.to_string(),
            },
            Err(panic) => ResolvedModule::Failed {
                path: matched_path.to_string(),
                message: panic_message(panic.as_ref()),
            },
        }
    }

    fn not_found(&self, attempted: &str) -> ResolvedModule {
        ResolvedModule::NotFound {
            attempted: attempted.to_string(),
            known: self.index.paths(),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "module loader panicked".to_string()
    }
}
