//! HTML page handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

use super::AppState;
use crate::models::Manifest;
use crate::modules::{CompanionKind, ResolvedModule};
use crate::navigation::{category_for_route, derive_navigation};
use crate::render::{self, CompanionView};
use crate::resolver::resolve;

type Page = (StatusCode, Html<String>);

fn page(status: StatusCode, markup: maud::Markup) -> Page {
    (status, Html(markup.into_string()))
}

/// Runs `render` against the current manifest, or shows the whole-page error.
fn with_manifest(state: &AppState, f: impl FnOnce(&Manifest) -> Page) -> Page {
    match state.manifest.current() {
        Some(manifest) => f(&manifest),
        None => no_manifest(),
    }
}

fn no_manifest() -> Page {
    page(
        StatusCode::SERVICE_UNAVAILABLE,
        render::manifest_error_page("The registry manifest could not be loaded."),
    )
}

pub async fn overview(State(state): State<AppState>) -> Page {
    with_manifest(&state, |manifest| {
        let navigation = derive_navigation(manifest);
        page(
            StatusCode::OK,
            render::overview_page(manifest, &navigation),
        )
    })
}

pub async fn category(State(state): State<AppState>, Path(route): Path<String>) -> Page {
    with_manifest(&state, |manifest| {
        let navigation = derive_navigation(manifest);
        match navigation.iter().find(|entry| entry.route == route) {
            Some(entry) => page(
                StatusCode::OK,
                render::category_page(manifest, &navigation, entry),
            ),
            None => page(
                StatusCode::NOT_FOUND,
                render::not_found_page(manifest, &navigation, &route),
            ),
        }
    })
}

pub async fn item(
    State(state): State<AppState>,
    Path((route, name)): Path<(String, String)>,
) -> Page {
    let Some(manifest) = state.manifest.current() else {
        return no_manifest();
    };
    let navigation = derive_navigation(&manifest);
    let found = category_for_route(&route)
        .and_then(|category| resolve(&manifest, category, &name).ok());

    let Some(item) = found else {
        return page(
            StatusCode::NOT_FOUND,
            render::not_found_page(&manifest, &navigation, &name),
        );
    };

    let (preview, docs) = match item.primary_path() {
        Some(path) => {
            let preview = state
                .modules
                .resolve_async(&item.name, path, CompanionKind::Preview)
                .await;
            let docs = state
                .modules
                .resolve_async(&item.name, path, CompanionKind::Docs)
                .await;
            (Some(preview), Some(docs))
        }
        None => (None, None),
    };

    page(
        StatusCode::OK,
        render::item_page(
            &manifest,
            &navigation,
            &route,
            item,
            view(preview.as_deref()),
            view(docs.as_deref()),
        ),
    )
}

fn view(resolved: Option<&ResolvedModule>) -> CompanionView<'_> {
    resolved.map_or(CompanionView::Hidden, CompanionView::from)
}
