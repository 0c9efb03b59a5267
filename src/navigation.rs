//! Category tabs derived from the manifest.

use crate::models::{Category, Manifest, NavigationEntry};

/// Static definition of one navigation tab.
#[derive(Debug, Clone, Copy)]
pub struct CategoryDefinition {
    pub category: Category,
    pub route: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

/// Every tab the site knows about, in display order.
pub const CATEGORY_DEFINITIONS: &[CategoryDefinition] = &[
    CategoryDefinition {
        category: Category::Ui,
        route: "components",
        icon: "component",
        label: "Components",
    },
    CategoryDefinition {
        category: Category::Component,
        route: "composites",
        icon: "layers",
        label: "Composites",
    },
    CategoryDefinition {
        category: Category::Block,
        route: "blocks",
        icon: "layout-grid",
        label: "Blocks",
    },
    CategoryDefinition {
        category: Category::Hook,
        route: "hooks",
        icon: "anchor",
        label: "Hooks",
    },
    CategoryDefinition {
        category: Category::Lib,
        route: "utilities",
        icon: "wrench",
        label: "Utilities",
    },
    CategoryDefinition {
        category: Category::Page,
        route: "pages",
        icon: "file-text",
        label: "Pages",
    },
    CategoryDefinition {
        category: Category::File,
        route: "files",
        icon: "file",
        label: "Files",
    },
    CategoryDefinition {
        category: Category::Style,
        route: "styles",
        icon: "palette",
        label: "Styles",
    },
    CategoryDefinition {
        category: Category::Theme,
        route: "themes",
        icon: "swatch-book",
        label: "Themes",
    },
];

impl From<&CategoryDefinition> for NavigationEntry {
    fn from(def: &CategoryDefinition) -> Self {
        Self {
            category: def.category,
            route: def.route.to_string(),
            icon: def.icon.to_string(),
            label: def.label.to_string(),
        }
    }
}

/// Tabs for the categories that have at least one item, in static order.
pub fn derive_navigation(manifest: &Manifest) -> Vec<NavigationEntry> {
    CATEGORY_DEFINITIONS
        .iter()
        .filter(|def| manifest.has_category(def.category))
        .map(NavigationEntry::from)
        .collect()
}

pub fn definition_for(category: Category) -> Option<&'static CategoryDefinition> {
    CATEGORY_DEFINITIONS
        .iter()
        .find(|def| def.category == category)
}

/// Map a URL segment back to its category.
pub fn category_for_route(route: &str) -> Option<Category> {
    CATEGORY_DEFINITIONS
        .iter()
        .find(|def| def.route == route)
        .map(|def| def.category)
}
