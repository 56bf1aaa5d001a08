use axum::{Json, extract::rejection::JsonRejection};
use std::time::Instant;

use crate::search_engine;

use super::models::{ApiError, SearchRequest, SearchResponse};

pub async fn search_handler(
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = Instant::now();

    let Json(request) = payload.map_err(|e| {
        log::warn!("rejected search payload: {}", e.body_text());
        ApiError::InvalidInput
    })?;

    let response = search_engine::execute(&request.array, request.target)?;

    log::info!(
        "search over {} values: {} steps, sorted={}, result={:?} in {}us",
        request.array.len(),
        response.steps.len(),
        response.sorted,
        response.result,
        start.elapsed().as_micros()
    );

    Ok(Json(response))
}
