use std::future::Future;

use crate::db::repository::DocumentRepository;
use crate::error::AppError;
use crate::models::document::{Document, GeoPoint};
use crate::search::matcher::SearchTerms;
use crate::search::ranking::rank_by_distance;

/// A validated search: the required words and an optional ranking origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub terms: SearchTerms,
    pub origin: Option<GeoPoint>,
}

impl SearchRequest {
    /// Build a request from the raw search parameters.
    ///
    /// `keyword` and `phrase` go through the same matcher; when both are
    /// supplied the phrase wins unless it is blank.
    pub fn from_params(
        keyword: Option<&str>,
        phrase: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, AppError> {
        let raw = phrase
            .filter(|p| !p.trim().is_empty())
            .or(keyword)
            .ok_or_else(|| AppError::InvalidQuery("provide 'palavraChave' or 'busca'".into()))?;
        let terms = SearchTerms::parse(raw)?;

        let origin = match (latitude, longitude) {
            (None, None) => None,
            (Some(latitude), Some(longitude)) => {
                Some(GeoPoint::new(latitude, longitude).map_err(AppError::InvalidQuery)?)
            }
            _ => {
                return Err(AppError::InvalidQuery(
                    "latitude and longitude must be provided together".into(),
                ))
            }
        };

        Ok(Self { terms, origin })
    }
}

/// Core search logic, separated from the HTTP layer for testability.
///
/// Retrieves the candidate pool from the store, keeps the documents the
/// matcher accepts, then orders them by distance when an origin is given.
/// If `cancelled` resolves before the store answers, the retrieval is
/// dropped and the search fails with `StoreUnavailable`.
pub async fn search_documents<C>(
    repo: &dyn DocumentRepository,
    request: &SearchRequest,
    cancelled: C,
) -> Result<Vec<Document>, AppError>
where
    C: Future<Output = ()>,
{
    let words = request.terms.words();

    let candidates = tokio::select! {
        biased;
        _ = cancelled => {
            tracing::warn!("Search cancelled before the store responded");
            return Err(AppError::StoreUnavailable(
                "search cancelled before the store responded".into(),
            ));
        }
        result = repo.find_candidates(words) => result?,
    };

    let candidate_count = candidates.len();
    let matched: Vec<Document> = candidates
        .into_iter()
        .filter(|doc| request.terms.matches(doc))
        .collect();

    tracing::debug!(
        "Search for {:?}: {} candidates, {} matches",
        words,
        candidate_count,
        matched.len()
    );

    Ok(rank_by_distance(matched, request.origin))
}
