//! HTTP delivery surface. Out of scope for the core per the design — this module is
//! the thin adapter that exposes [`crate::orchestrator::Orchestrator::execute`] over
//! HTTP and maps its error kinds onto status codes.

mod error;
mod handlers;
mod state;


pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the router. `/v1/chat` is the sole entry point into the orchestrator;
/// `/health` is a liveness probe that does not touch any collaborator.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/chat", post(handlers::generate))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
