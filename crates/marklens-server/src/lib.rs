//! HTTP surface for MarkLens: one POST endpoint per annotator.

mod error;
mod handlers;

pub use error::ApiError;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use marklens_linkcheck::LinkChecker;
use tower_http::trace::TraceLayer;

/// Shared per-process state: the link checker and the detector budget.
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<LinkChecker>,
    pub time_budget: Duration,
}

/// Build the full router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/analyze/outliers", post(handlers::outliers))
        .route("/analyze/metadata", post(handlers::metadata))
        .route("/analyze/categories", post(handlers::categories))
        .route("/analyze/forgotten", post(handlers::forgotten))
        .route("/analyze/priority", post(handlers::priority))
        .route("/analyze/summaries", post(handlers::summaries))
        .route("/analyze/folder-heat", post(handlers::folder_heat))
        .route("/analyze/folder-names", post(handlers::folder_names))
        .route("/analyze/clusters", post(handlers::clusters))
        .route("/check/links", post(handlers::links))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
