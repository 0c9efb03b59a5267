use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Category, FileRef, Item};

/// The aggregate registry description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Manifest {
    /// Whether any item belongs to `category`.
    pub fn has_category(&self, category: Category) -> bool {
        self.items.iter().any(|item| item.category == category)
    }

    /// Items of one category, in manifest order.
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(move |item| item.category == category)
    }

    /// Data-quality problems in the manifest.
    ///
    /// Loading never rejects a manifest for these; lookups tolerate them
    /// (first match wins on duplicates).
    pub fn validate(&self) -> Vec<ManifestIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for item in &self.items {
            if item.files.is_empty() {
                issues.push(ManifestIssue::NoFiles {
                    name: item.name.clone(),
                });
            }
            if !seen.insert(item.name.as_str()) {
                issues.push(ManifestIssue::DuplicateName {
                    name: item.name.clone(),
                });
            }
        }

        issues
    }
}

/// A data-quality defect found by [`Manifest::validate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ManifestIssue {
    NoFiles { name: String },
    DuplicateName { name: String },
}

impl std::fmt::Display for ManifestIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFiles { name } => write!(f, "item '{}' declares no files", name),
            Self::DuplicateName { name } => write!(f, "item name '{}' is not unique", name),
        }
    }
}

/// Public per-item manifest, the shape external tooling installs from.
///
/// A projection of [`Item`]: same fields, renamed for the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicItem {
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub description: Option<String>,
    pub files: Vec<FileRef>,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl From<&Item> for PublicItem {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category,
            description: item.description.clone(),
            files: item.files.clone(),
            dependencies: item.dependencies.clone(),
            dev_dependencies: item.dev_dependencies.clone(),
        }
    }
}
