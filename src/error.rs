//! Error kinds surfaced by the orchestrator to its caller.
//!
//! Collaborator errors that the orchestrator recovers from locally (extractor, judge,
//! vector-search, background-write) are logged where they occur and never constructed
//! as a [`SentinelError`] — only the four kinds below ever reach the HTTP layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentinelError {
    /// The user is over their token budget, or the limiter was unreachable
    /// (fail-closed).
    #[error("rate limit exceeded")]
    RateLimitExceeded,

    /// The embedding RPC failed, or returned a zero-length vector.
    #[error("embedding failed: {reason}")]
    EmbeddingFailed { reason: String },

    /// Both the primary (after retries) and the fallback provider failed, or the
    /// resilient provider's global deadline fired.
    #[error("generation failed: {reason}")]
    GenerationFailed { reason: String },

    /// `user_id` or `prompt` was empty.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}
