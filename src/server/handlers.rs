use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error::ApiError;
use super::state::AppState;
use crate::model::Request;

pub const CACHE_HIT_HEADER: &str = "X-Sentinel-Cache-Hit";

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<Request>,
) -> Result<Response, ApiError> {
    let response = state.orchestrator.execute(&request).await?;

    let cache_hit = HeaderValue::from_static(if response.cached { "true" } else { "false" });
    let mut http_response = Json(response).into_response();
    http_response
        .headers_mut()
        .insert(CACHE_HIT_HEADER, cache_hit);

    Ok(http_response)
}
