//! Item lookup by category and name.

use thiserror::Error;

use crate::models::{Category, Item, Manifest};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Item not found: {category}/{name}")]
    NotFound { category: Category, name: String },
}

/// Find the item with exactly this category and name.
///
/// Linear scan; when the manifest holds duplicates the first one wins.
pub fn resolve<'a>(
    manifest: &'a Manifest,
    category: Category,
    name: &str,
) -> Result<&'a Item, ResolveError> {
    manifest
        .items
        .iter()
        .find(|item| item.category == category && item.name == name)
        .ok_or_else(|| ResolveError::NotFound {
            category,
            name: name.to_string(),
        })
}
