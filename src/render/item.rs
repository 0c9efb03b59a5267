use maud::{html, Markup, PreEscaped};

use super::{category_label, layout};
use crate::models::{Item, Manifest, NavigationEntry};
use crate::modules::ResolvedModule;

/// How a companion shows up on the detail page.
#[derive(Debug, Clone, Copy)]
pub enum CompanionView<'a> {
    Content(&'a str),
    Error(&'a str),
    Hidden,
}

impl<'a> From<&'a ResolvedModule> for CompanionView<'a> {
    fn from(resolved: &'a ResolvedModule) -> Self {
        match resolved {
            ResolvedModule::Found { content, .. } => Self::Content(content.as_str()),
            ResolvedModule::Failed { message, .. } => Self::Error(message),
            ResolvedModule::NotFound { .. } => Self::Hidden,
        }
    }
}

/// Detail page of one item.
///
/// Missing companions are left out; the page still renders from manifest
/// metadata alone.
pub fn item_page(
    manifest: &Manifest,
    navigation: &[NavigationEntry],
    route: &str,
    item: &Item,
    preview: CompanionView<'_>,
    docs: CompanionView<'_>,
) -> Markup {
    let body = html! {
        a.back href={ "/" (route) } { "← " (category_label(item)) }
        h1 { (item.title()) }
        @if let Some(description) = &item.description {
            p.description { (description) }
        }

        (companion_section("Preview", "preview", preview))

        section.files {
            h2 { "Files" }
            ul {
                @for file in &item.files {
                    li {
                        code { (file.path()) }
                        @if let Some(category) = file.category() {
                            " " small { (category) }
                        }
                    }
                }
            }
        }

        @if !item.dependencies.is_empty() {
            section.dependencies {
                h2 { "Dependencies" }
                ul { @for dep in &item.dependencies { li { code { (dep) } } } }
            }
        }
        @if !item.dev_dependencies.is_empty() {
            section.dev-dependencies {
                h2 { "Dev dependencies" }
                ul { @for dep in &item.dev_dependencies { li { code { (dep) } } } }
            }
        }

        (companion_section("Documentation", "docs", docs))
    };

    layout(Some(manifest), navigation, Some(route), &item.title(), body)
}

fn companion_section(heading: &str, kind: &str, view: CompanionView<'_>) -> Markup {
    html! {
        @match view {
            CompanionView::Content(content) => {
                section class=(kind) {
                    h2 { (heading) }
                    div.preview[kind == "preview"] { (PreEscaped(content)) }
                }
            },
            CompanionView::Error(message) => {
                section class=(kind) {
                    h2 { (heading) }
                    div.error { "Failed to load " (heading.to_lowercase()) ": " (message) }
                }
            },
            CompanionView::Hidden => {},
        }
    }
}
