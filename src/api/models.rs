use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub use crate::data_models::{ErrorBody, SearchRequest, SearchResponse, SearchStep};
use crate::search_engine::SearchError;

pub const INVALID_INPUT: &str = "Invalid input. Ensure array and target are numeric.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", INVALID_INPUT)]
    InvalidInput,
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
