//! HTTP REST adapter
//!
//! Depends only on core/. Thin and stateless: decodes request
//! parameters, calls the query executor, serializes results.

pub mod handlers;
pub mod middleware;

use crate::core::services::Services;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Build the application router.
///
/// Shared between the server binary and the integration tests so
/// both exercise the same middleware stack.
pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/indexes", get(handlers::indexes_handler))
        .route(
            "/search",
            get(handlers::search_handler).fallback(handlers::method_not_allowed),
        )
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(axum::middleware::from_fn(middleware::cors))
        .with_state(services)
}
