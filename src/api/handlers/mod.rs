use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::AppState;
use crate::manifest::ManifestError;
use crate::models::*;
use crate::modules::{CacheStats, CompanionKind, ResolvedModule};
use crate::navigation::derive_navigation;
use crate::resolver::resolve;

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn manifest_error(e: ManifestError) -> (StatusCode, String) {
    match e {
        ManifestError::NotFound(_) => {
            tracing::warn!("{}", e);
            (StatusCode::NOT_FOUND, e.to_string())
        }
        ManifestError::Parse(_) => {
            tracing::warn!("{}", e);
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        ManifestError::Io(_) | ManifestError::Http(_) => internal_error(e),
    }
}

pub(super) fn current_manifest(state: &AppState) -> Result<Arc<Manifest>, (StatusCode, String)> {
    state.manifest.current().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "No manifest loaded".to_string(),
    ))
}

fn parse_category(slug: &str) -> Result<Category, (StatusCode, String)> {
    Category::parse(slug).ok_or((
        StatusCode::NOT_FOUND,
        format!("Unknown category: {}", slug),
    ))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Manifest
// ============================================================

pub async fn get_manifest(
    State(state): State<AppState>,
) -> Result<Json<Manifest>, (StatusCode, String)> {
    current_manifest(&state).map(|m| Json(m.as_ref().clone()))
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub name: String,
    pub version: String,
    pub items: usize,
}

pub async fn reload_manifest(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    let source = state.source.as_ref().ok_or((
        StatusCode::BAD_REQUEST,
        "Manifest reloading is not configured".to_string(),
    ))?;

    let manifest = state.manifest.reload(source).await.map_err(manifest_error)?;
    Ok(Json(ReloadResponse {
        name: manifest.name.clone(),
        version: manifest.version.clone(),
        items: manifest.items.len(),
    }))
}

pub async fn get_navigation(
    State(state): State<AppState>,
) -> Result<Json<Vec<NavigationEntry>>, (StatusCode, String)> {
    current_manifest(&state).map(|m| Json(derive_navigation(&m)))
}

// ============================================================
// Items
// ============================================================

pub async fn get_item(
    State(state): State<AppState>,
    Path((category, name)): Path<(String, String)>,
) -> Result<Json<Item>, (StatusCode, String)> {
    let manifest = current_manifest(&state)?;
    let category = parse_category(&category)?;

    resolve(&manifest, category, &name)
        .map(|item| Json(item.clone()))
        .map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))
}

pub async fn get_companion(
    State(state): State<AppState>,
    Path((category, name, kind)): Path<(String, String, String)>,
) -> Result<Json<ResolvedModule>, (StatusCode, String)> {
    let manifest = current_manifest(&state)?;
    let category = parse_category(&category)?;
    let kind = CompanionKind::parse(&kind).ok_or((
        StatusCode::NOT_FOUND,
        format!("Unknown companion kind: {}", kind),
    ))?;

    let item = resolve(&manifest, category, &name)
        .map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))?;
    let source_path = item.primary_path().ok_or((
        StatusCode::NOT_FOUND,
        format!("Item {} declares no files", item.name),
    ))?;

    let resolved = state
        .modules
        .resolve_async(&item.name, source_path, kind)
        .await;
    Ok(Json(resolved.as_ref().clone()))
}

// ============================================================
// Companion modules
// ============================================================

#[derive(Debug, Serialize)]
pub struct ModulesResponse {
    pub paths: Vec<String>,
    #[serde(flatten)]
    pub stats: CacheStats,
}

pub async fn list_modules(State(state): State<AppState>) -> Json<ModulesResponse> {
    Json(ModulesResponse {
        paths: state.modules.index().paths(),
        stats: state.modules.stats(),
    })
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub identifier: String,
    pub invalidated: usize,
}

/// Source-change signal: forget cached companions of one identifier.
pub async fn invalidate_module(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Json<InvalidateResponse> {
    let invalidated = state.modules.source_changed(&identifier);
    Json(InvalidateResponse {
        identifier,
        invalidated,
    })
}
