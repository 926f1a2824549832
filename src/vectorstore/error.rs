use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by vector store operations.
pub enum VectorStoreError {
    /// Could not connect to the Qdrant endpoint.
    #[error("failed to connect to vector store at '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// Collection creation failed.
    #[error("failed to create collection '{collection}': {message}")]
    CreateCollectionFailed { collection: String, message: String },

    /// Upsert failed.
    #[error("failed to upsert point into '{collection}': {message}")]
    UpsertFailed { collection: String, message: String },

    /// Search failed.
    #[error("failed to search in '{collection}': {message}")]
    SearchFailed { collection: String, message: String },

    /// Vector dimension mismatch against the collection's configured dimension.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
}
