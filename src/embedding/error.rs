use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by embedding generation.
pub enum EmbeddingError {
    /// The embedding RPC itself failed.
    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    /// The model returned a zero-length vector.
    #[error("embedding model returned an empty vector")]
    EmptyEmbedding,
}
