//! Request handlers.
//!
//! Every annotation endpoint follows the same shape: parse the batch, run
//! the annotator, wrap the rows in `{"results": [...]}`. Malformed bodies
//! become 400s before any processing; per-item degradation happens inside
//! the annotators and never fails the batch.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use marklens_analyze as analyze;
use marklens_core::{Record, batch_items, batch_records};
use serde_json::{Value, json};
use tracing::info;

use crate::{ApiError, AppState};

/// Body extractor whose rejection we map to a JSON 400 ourselves.
type JsonBody = Result<Json<Value>, JsonRejection>;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn outliers(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<Json<Value>, ApiError> {
    let records = batch_records(&body_value(body)?)?;
    info!(count = records.len(), "detecting folder outliers");

    // CPU-bound and budgeted in wall-clock time: keep it off the async runtime.
    let deadline = Instant::now() + state.time_budget;
    let annotated =
        tokio::task::spawn_blocking(move || analyze::detect_outliers(records, deadline))
            .await
            .map_err(|err| ApiError::internal(format!("outlier detection failed: {err}")))?;
    Ok(results(annotated))
}

pub async fn links(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<Json<Value>, ApiError> {
    let items = batch_items(&body_value(body)?)?;
    info!(count = items.len(), "checking link liveness");
    let rows = state.checker.check_batch(&items).await;
    Ok(results(rows))
}

pub async fn metadata(body: JsonBody) -> Result<Json<Value>, ApiError> {
    annotate_each(body, analyze::metadata::audit_metadata)
}

pub async fn categories(body: JsonBody) -> Result<Json<Value>, ApiError> {
    annotate_each(body, analyze::category::suggest_category)
}

pub async fn forgotten(body: JsonBody) -> Result<Json<Value>, ApiError> {
    annotate_each(body, analyze::forgotten::score_forgotten)
}

pub async fn priority(body: JsonBody) -> Result<Json<Value>, ApiError> {
    annotate_each(body, analyze::priority::score_priority)
}

pub async fn summaries(body: JsonBody) -> Result<Json<Value>, ApiError> {
    annotate_each(body, analyze::summary::summarize)
}

pub async fn folder_heat(body: JsonBody) -> Result<Json<Value>, ApiError> {
    let mut records = batch_records(&body_value(body)?)?;
    analyze::folders::score_folder_heat(&mut records);
    Ok(results(records))
}

pub async fn folder_names(body: JsonBody) -> Result<Json<Value>, ApiError> {
    let mut records = batch_records(&body_value(body)?)?;
    analyze::folders::suggest_folder_names(&mut records);
    Ok(results(records))
}

pub async fn clusters(body: JsonBody) -> Result<Json<Value>, ApiError> {
    let records = batch_records(&body_value(body)?)?;
    Ok(results(analyze::cluster::cluster_by_content(records)))
}

fn annotate_each(body: JsonBody, annotate: fn(&mut Record)) -> Result<Json<Value>, ApiError> {
    let mut records = batch_records(&body_value(body)?)?;
    for record in &mut records {
        annotate(record);
    }
    Ok(results(records))
}

fn body_value(body: JsonBody) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(_) => Err(ApiError::bad_request("request body is not valid JSON")),
    }
}

fn results(records: Vec<Record>) -> Json<Value> {
    Json(json!({ "results": records }))
}
