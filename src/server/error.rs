use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::SentinelError;

/// Wraps [`SentinelError`] for the `IntoResponse` impl. The mapping is deliberately
/// coarse: `RateLimitExceeded → 429`, everything else `→ 500`. The core exposes no
/// structured error codes beyond the kind name.
pub struct ApiError(pub SentinelError);

impl From<SentinelError> for ApiError {
    fn from(err: SentinelError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SentinelError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            SentinelError::EmbeddingFailed { .. }
            | SentinelError::GenerationFailed { .. }
            | SentinelError::InvalidRequest { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
