use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::app::AppState;
use crate::db::repository::DocumentRepository;
use crate::error::AppError;
use crate::models::document::{Document, NewDocument};

/// Core creation logic — separated from the HTTP layer for testability.
///
/// Validates the request and persists the document exactly once.
pub async fn process_create(
    repo: &dyn DocumentRepository,
    request: NewDocument,
) -> Result<Document, AppError> {
    let document = request.into_document().map_err(|e| {
        tracing::debug!("Rejected document: {e}");
        e
    })?;

    let stored = repo.insert(document).await?;
    tracing::info!(
        "Created document {}",
        stored.id.as_deref().unwrap_or_default()
    );
    Ok(stored)
}

/// Axum handler for `POST /documentos`.
pub async fn create_document_handler(
    State(state): State<AppState>,
    body: Result<Json<NewDocument>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let Json(request) = body?;
    let document = process_create(state.document_repo.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(document)))
}
