use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use borsatrack_accounting::errors::Error as CoreError;
use serde_json::json;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wraps core errors so handlers can use `?` and still produce a JSON body.
#[derive(Debug)]
pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            // Bad batches are the caller's input problem
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            // Well-formed input the ledger cannot honor (e.g. oversell)
            CoreError::Calculation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        tracing::warn!("Request failed: {}", self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
