//! Runtime configuration.
//!
//! Values come from environment variables with built-in defaults; CLI flags
//! override them in `main.rs`.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `REGISTRY_DOCS_MANIFEST` | `public/registry.json` |
//! | `REGISTRY_DOCS_ROOT` | `.` |
//! | `REGISTRY_DOCS_DIR` | `registry` |
//! | `REGISTRY_DOCS_PORT` | `3000` |
//! | `REGISTRY_DOCS_PREVIEW_SUFFIX` | `.preview.html` |
//! | `REGISTRY_DOCS_DOCS_SUFFIX` | `.docs.md` |
//! | `REGISTRY_DOCS_PUBLIC_DIR` | `public/r` |

use std::path::PathBuf;

use crate::manifest::ManifestSource;
use crate::modules::CompanionSuffixes;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Manifest file path or URL.
    pub manifest: String,
    /// Directory the manifest's file paths are relative to.
    pub root: PathBuf,
    /// Registry directory under `root` that holds companion files.
    pub registry_dir: String,
    pub port: u16,
    pub suffixes: CompanionSuffixes,
    /// Output directory of the per-item public manifests.
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: "public/registry.json".to_string(),
            root: PathBuf::from("."),
            registry_dir: "registry".to_string(),
            port: DEFAULT_PORT,
            suffixes: CompanionSuffixes::default(),
            public_dir: PathBuf::from("public/r"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("REGISTRY_DOCS_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid REGISTRY_DOCS_PORT: {}", raw);
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            manifest: lookup("REGISTRY_DOCS_MANIFEST").unwrap_or(defaults.manifest),
            root: lookup("REGISTRY_DOCS_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.root),
            registry_dir: lookup("REGISTRY_DOCS_DIR").unwrap_or(defaults.registry_dir),
            port,
            suffixes: CompanionSuffixes {
                preview: lookup("REGISTRY_DOCS_PREVIEW_SUFFIX")
                    .unwrap_or(defaults.suffixes.preview),
                docs: lookup("REGISTRY_DOCS_DOCS_SUFFIX").unwrap_or(defaults.suffixes.docs),
            },
            public_dir: lookup("REGISTRY_DOCS_PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
        }
    }

    pub fn manifest_source(&self) -> ManifestSource {
        ManifestSource::parse(&self.manifest)
    }
}
