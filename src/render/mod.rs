//! HTML pages of the documentation site, built with maud.
//!
//! Every function here is pure: it takes already-resolved data and returns
//! markup. Handlers in [`crate::api`] do the lookups.

mod item;

pub use item::{item_page, CompanionView};

use maud::{html, Markup, DOCTYPE};

use crate::models::{Item, Manifest, NavigationEntry};
use crate::navigation::definition_for;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #18181b; }
header { display: flex; gap: 1.5rem; align-items: baseline; padding: 1rem 2rem; border-bottom: 1px solid #e4e4e7; }
header .brand { font-weight: 600; text-decoration: none; color: inherit; }
header .version { color: #71717a; font-size: .85rem; }
nav a { margin-right: 1rem; color: #3f3f46; text-decoration: none; }
nav a.active { font-weight: 600; color: #18181b; }
main { padding: 2rem; max-width: 60rem; }
.card-list { list-style: none; padding: 0; display: grid; grid-template-columns: repeat(auto-fill, minmax(14rem, 1fr)); gap: 1rem; }
.card-list li { border: 1px solid #e4e4e7; border-radius: .5rem; padding: 1rem; }
.preview { border: 1px dashed #d4d4d8; border-radius: .5rem; padding: 1.5rem; }
.error { background: #fef2f2; color: #991b1b; padding: 1rem; border-radius: .5rem; }
.back { color: #a1a1aa; text-decoration: none; }
code { font-size: .9em; }
"#;

/// Page chrome shared by every page.
///
/// `manifest` is `None` only for the error page shown when no manifest could
/// be loaded.
pub fn layout(
    manifest: Option<&Manifest>,
    navigation: &[NavigationEntry],
    active_route: Option<&str>,
    title: &str,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title {
                    (title)
                    @if let Some(m) = manifest { " · " (m.name) }
                }
                style { (maud::PreEscaped(STYLE)) }
            }
            body {
                header {
                    a.brand href="/" {
                        @match manifest {
                            Some(m) => { (m.name) },
                            None => { "Registry" },
                        }
                    }
                    @if let Some(m) = manifest {
                        span.version { "v" (m.version) }
                    }
                    nav {
                        @for entry in navigation {
                            a href={ "/" (entry.route) }
                                class=[(active_route == Some(entry.route.as_str())).then_some("active")]
                                data-icon=(entry.icon) {
                                (entry.label)
                            }
                        }
                    }
                }
                main { (body) }
            }
        }
    }
}

/// Landing page: one section per navigation tab with its items.
pub fn overview_page(manifest: &Manifest, navigation: &[NavigationEntry]) -> Markup {
    let body = html! {
        h1 { (manifest.name) }
        p { (manifest.items.len()) " items in " (navigation.len()) " categories." }
        @for entry in navigation {
            section {
                h2 { a href={ "/" (entry.route) } { (entry.label) } }
                (item_list(&entry.route, manifest.items_in(entry.category)))
            }
        }
    };
    layout(Some(manifest), navigation, None, "Overview", body)
}

/// Listing of one category.
pub fn category_page(
    manifest: &Manifest,
    navigation: &[NavigationEntry],
    entry: &NavigationEntry,
) -> Markup {
    let body = html! {
        h1 { (entry.label) }
        (item_list(&entry.route, manifest.items_in(entry.category)))
    };
    layout(
        Some(manifest),
        navigation,
        Some(&entry.route),
        &entry.label,
        body,
    )
}

fn item_list<'a>(route: &str, items: impl Iterator<Item = &'a Item>) -> Markup {
    html! {
        ul.card-list {
            @for item in items {
                li {
                    a href={ "/" (route) "/" (item.name) } { strong { (item.title()) } }
                    @if let Some(description) = &item.description {
                        p { (description) }
                    }
                }
            }
        }
    }
}

/// Shown for an unknown category route or item name.
///
/// The back link stays navigable but is styled muted.
pub fn not_found_page(manifest: &Manifest, navigation: &[NavigationEntry], what: &str) -> Markup {
    let body = html! {
        h1 { "Component not found" }
        p { "Nothing called " code { (what) } " exists in this registry." }
        a.back href="/" { "← Back to overview" }
    };
    layout(Some(manifest), navigation, None, "Not found", body)
}

/// Whole-page error when no manifest is available.
pub fn manifest_error_page(message: &str) -> Markup {
    let body = html! {
        h1 { "Registry unavailable" }
        div.error { (message) }
    };
    layout(None, &[], None, "Error", body)
}

/// Label of the tab an item lives under, falling back to its raw category.
pub(crate) fn category_label(item: &Item) -> String {
    definition_for(item.category)
        .map(|def| def.label.to_string())
        .unwrap_or_else(|| item.category.to_string())
}
