use serde::{Deserialize, Serialize};

use super::Category;

/// A category tab in the site navigation.
///
/// Never stored: recomputed from the current manifest on every read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigationEntry {
    pub category: Category,
    /// URL segment of the category listing (e.g. `components`).
    pub route: String,
    pub icon: String,
    pub label: String,
}
