//! Companion module resolution.
//!
//! Every item's first declared file can have two companions: a preview and a
//! documentation unit. Their paths are derived by swapping the source file's
//! extension for a fixed suffix (`button.tsx` -> `button.docs.md`). The
//! companions themselves come from a [`ModuleIndex`] built once at startup.
//!
//! Resolution runs a fixed chain and stops at the first success:
//!
//! 1. exact lookup of the derived path in the index;
//! 2. first indexed path whose file name, minus the suffix, equals the item
//!    identifier;
//! 3. load the module and pick its export ([`ModuleExports::preferred`]);
//! 4. anything unmatched or without a renderable export becomes
//!    [`ResolvedModule::NotFound`] carrying the full index as diagnostics;
//! 5. a failing or panicking loader becomes [`ResolvedModule::Failed`].
//!
//! Results are cached per `(identifier, derived path)` until a source change
//! is signalled for that identifier.

mod exports;
mod index;
mod resolver;

pub use exports::*;
pub use index::{Loader, ModuleIndex};
pub use resolver::{CacheStats, ModuleResolver};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while materializing a located companion module.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data export '{name}': {source}")]
    Data {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// Which companion of an item is wanted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CompanionKind {
    Preview,
    Docs,
}

impl CompanionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Docs => "docs",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "preview" => Some(Self::Preview),
            "docs" => Some(Self::Docs),
            _ => None,
        }
    }
}

/// File name suffixes that mark companion files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionSuffixes {
    pub preview: String,
    pub docs: String,
}

impl Default for CompanionSuffixes {
    fn default() -> Self {
        Self {
            preview: ".preview.html".to_string(),
            docs: ".docs.md".to_string(),
        }
    }
}

impl CompanionSuffixes {
    pub fn for_kind(&self, kind: CompanionKind) -> &str {
        match kind {
            CompanionKind::Preview => &self.preview,
            CompanionKind::Docs => &self.docs,
        }
    }

    /// The companion kind a path belongs to, judged by its suffix.
    pub fn kind_of(&self, path: &str) -> Option<CompanionKind> {
        [CompanionKind::Preview, CompanionKind::Docs]
            .into_iter()
            .find(|kind| path.ends_with(self.for_kind(*kind)))
    }
}

/// Swap the extension of the last path segment for `suffix`.
///
/// A segment without an extension gets the suffix appended.
pub fn companion_path(source_path: &str, suffix: &str) -> String {
    let segment_start = source_path.rfind('/').map_or(0, |i| i + 1);
    let stem_end = source_path[segment_start..]
        .rfind('.')
        .filter(|&dot| dot > 0)
        .map_or(source_path.len(), |dot| segment_start + dot);
    format!("{}{}", &source_path[..stem_end], suffix)
}

/// Final segment of `path` with `suffix` removed, if it carries that suffix.
pub(crate) fn companion_stem<'a>(path: &'a str, suffix: &str) -> Option<&'a str> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.strip_suffix(suffix)
}

/// Outcome of one companion resolution. Never an error for the caller: every
/// failure is a value the page can render.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolvedModule {
    Found {
        /// Index path the module was loaded from.
        path: String,
        /// Name of the export being displayed.
        export: String,
        content: Renderable,
    },
    NotFound {
        attempted: String,
        known: Vec<String>,
    },
    Failed {
        path: String,
        message: String,
    },
}

impl ResolvedModule {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn content(&self) -> Option<&Renderable> {
        match self {
            Self::Found { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn companion_path_replaces_extension() {
        assert_eq!(
            companion_path("registry/ui/button/button.tsx", ".docs.md"),
            "registry/ui/button/button.docs.md"
        );
        assert_eq!(
            companion_path("registry/ui/button/button.tsx", ".docs.tsx"),
            "registry/ui/button/button.docs.tsx"
        );
    }

    #[test]
    fn companion_path_only_looks_at_last_segment() {
        assert_eq!(
            companion_path("registry/v1.2/Makefile", ".docs.md"),
            "registry/v1.2/Makefile.docs.md"
        );
        assert_eq!(
            companion_path("registry/.env", ".docs.md"),
            "registry/.env.docs.md"
        );
        assert_eq!(
            companion_path("util.test.ts", ".preview.html"),
            "util.test.preview.html"
        );
    }

    #[test]
    fn companion_stem_requires_suffix() {
        assert_eq!(
            companion_stem("registry/ui/button.docs.md", ".docs.md"),
            Some("button")
        );
        assert_eq!(companion_stem("registry/ui/button.tsx", ".docs.md"), None);
    }

    #[test]
    fn kind_of_matches_suffixes() {
        let suffixes = CompanionSuffixes::default();
        assert_eq!(
            suffixes.kind_of("a/b.preview.html"),
            Some(CompanionKind::Preview)
        );
        assert_eq!(suffixes.kind_of("a/b.docs.md"), Some(CompanionKind::Docs));
        assert_eq!(suffixes.kind_of("a/b.md"), None);
    }
}
