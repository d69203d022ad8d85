use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::AppError;
use crate::models::document::Document;
use crate::search::service::{search_documents, SearchRequest};

/// Query string of `GET /documentos`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Keyword search (one or more words).
    #[serde(rename = "palavraChave")]
    pub palavra_chave: Option<String>,
    /// Phrase search. Same matching rule as `palavraChave`.
    pub busca: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Axum handler for `GET /documentos`.
///
/// Returns the matching documents as a JSON array, nearest first when
/// `latitude` and `longitude` are given.
pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Document>>, AppError> {
    let Query(params) = params?;

    let request = SearchRequest::from_params(
        params.palavra_chave.as_deref(),
        params.busca.as_deref(),
        params.latitude,
        params.longitude,
    )
    .map_err(|e| {
        tracing::debug!("Rejected search: {e}");
        e
    })?;

    let documents = search_documents(
        state.document_repo.as_ref(),
        &request,
        tokio::time::sleep(state.search_timeout),
    )
    .await?;

    Ok(Json(documents))
}
