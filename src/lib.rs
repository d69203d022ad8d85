pub mod app;
pub mod config;
pub mod error;
pub mod models {
    pub mod document;
}
pub mod db {
    pub mod memory;
    pub mod models;
    pub mod repository;
}
pub mod search {
    pub mod matcher;
    pub mod ranking;
    pub mod service;
}
pub mod api {
    pub mod documents;
    pub mod errors;
    pub mod search;

    /// Liveness probe for `GET /health`.
    pub async fn health_handler() -> axum::Json<serde_json::Value> {
        axum::Json(serde_json::json!({ "status": "ok" }))
    }
}
