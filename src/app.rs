use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::db::repository::DocumentRepository;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub document_repo: Arc<dyn DocumentRepository>,
    /// How long a search may wait on the store before it is cancelled.
    pub search_timeout: Duration,
}

impl AppState {
    pub fn new(document_repo: Arc<dyn DocumentRepository>, search_timeout: Duration) -> Self {
        Self {
            document_repo,
            search_timeout,
        }
    }
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/documentos",
            get(api::search::search_handler).post(api::documents::create_document_handler),
        )
        .route("/health", get(api::health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
