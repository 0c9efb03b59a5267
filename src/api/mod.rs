mod handlers;
mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::manifest::{ManifestSource, ManifestStore};
use crate::modules::ModuleResolver;

/// Shared state of every handler.
#[derive(Clone)]
pub struct AppState {
    pub manifest: ManifestStore,
    pub modules: ModuleResolver,
    /// Where `POST /manifest/reload` reads from. `None` disables reloading.
    pub source: Option<ManifestSource>,
}

impl AppState {
    pub fn new(manifest: ManifestStore, modules: ModuleResolver) -> Self {
        Self {
            manifest,
            modules,
            source: None,
        }
    }

    pub fn with_source(mut self, source: ManifestSource) -> Self {
        self.source = Some(source);
        self
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Manifest
        .route("/manifest", get(handlers::get_manifest))
        .route("/manifest/reload", post(handlers::reload_manifest))
        .route("/navigation", get(handlers::get_navigation))
        // Items
        .route("/items/{category}/{name}", get(handlers::get_item))
        .route("/items/{category}/{name}/{kind}", get(handlers::get_companion))
        // Companion modules
        .route("/modules", get(handlers::list_modules))
        .route("/modules/{identifier}/invalidate", post(handlers::invalidate_module))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(pages::overview))
        .route("/{route}", get(pages::category))
        .route("/{route}/{name}", get(pages::item))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
