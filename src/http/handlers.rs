//! HTTP request handlers for the lineseek API
//!
//! Implements handlers for the search, index listing, and health
//! endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::core::error::LineseekError;
use crate::core::services::Services;
use crate::core::types::*;

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Index listing handler
///
/// Reports the indexes available for search and the entries that
/// failed validation at startup.
pub async fn indexes_handler(State(services): State<Arc<Services>>) -> Json<IndexesResponse> {
    Json(IndexesResponse {
        indexes: services.registry.names(),
        skipped: services.registry.skipped().to_vec(),
    })
}

/// Search handler
///
/// Resolves the requested index name and executes one search on a
/// blocking task, bounded by the configured timeout.
///
/// # Errors
///
/// - `InvalidIndexName`: name is empty or not a plain directory name
/// - `IndexNotFound`: name does not resolve to an openable index
/// - `SearchFailed`: query execution failed or timed out
pub async fn search_handler(
    State(services): State<Arc<Services>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, LineseekError> {
    let descriptor = services.registry.resolve(&params.index)?.clone();
    let index_name = descriptor.name.clone();

    info!(index = %index_name, term = %params.term, "executing search");

    let search = Arc::clone(&services.search);
    let timeout = Duration::from_secs(services.config.search.timeout_sec);
    let term = params.term;
    let (from, size) = (params.from, params.size);

    let results = bounded_search(timeout, &index_name, move || {
        search.search(&descriptor, &term, from, size)
    })
    .await?;

    Ok(Json(SearchResponse::from(results)))
}

/// Run one search on a blocking task, bounded by `timeout`.
///
/// Open/search/close is synchronous work; keep it off the runtime
/// threads and bound its lifetime. Expiry and a crashed worker both
/// surface as `SearchFailed`.
async fn bounded_search<F>(
    timeout: Duration,
    index_name: &str,
    task: F,
) -> Result<SearchResults, LineseekError>
where
    F: FnOnce() -> Result<SearchResults, LineseekError> + Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(task)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(LineseekError::SearchFailed(format!(
            "Search task failed for index {index_name}: {join_err}"
        ))),
        Err(_) => Err(LineseekError::SearchFailed(format!(
            "Search against index {index_name} timed out after {timeout:?}"
        ))),
    }
}

/// Fallback for non-GET methods on `/search`
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
