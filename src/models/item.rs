use serde::{Deserialize, Deserializer, Serialize};

use super::Category;

/// One catalog entry of the registry.
///
/// `files` lists the item's source files in declaration order; the first file
/// is the one companion previews and docs are derived from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub files: Vec<FileRef>,
    /// Package identifiers. Duplicates are dropped, first occurrence kept.
    #[serde(default, deserialize_with = "dedup_strings")]
    pub dependencies: Vec<String>,
    #[serde(default, deserialize_with = "dedup_strings")]
    pub dev_dependencies: Vec<String>,
}

impl Item {
    /// Path of the first declared file, if any.
    pub fn primary_path(&self) -> Option<&str> {
        self.files.first().map(FileRef::path)
    }

    /// Label shown in listings: dash-separated words, each capitalized, joined by spaces.
    pub fn title(&self) -> String {
        self.name
            .split('-')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A file declared by an item.
///
/// The registry accepts both a bare path and an object carrying its own
/// category. The file category is independent from the parent item's.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FileRef {
    Path(String),
    Typed {
        path: String,
        #[serde(rename = "type", alias = "category")]
        category: Category,
    },
}

impl FileRef {
    pub fn path(&self) -> &str {
        match self {
            Self::Path(path) => path,
            Self::Typed { path, .. } => path,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Path(_) => None,
            Self::Typed { category, .. } => Some(*category),
        }
    }
}

fn dedup_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for value in raw {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    Ok(out)
}
