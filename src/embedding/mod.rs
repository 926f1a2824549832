//! `Embedder` capability port: turns prompt text into a fixed-dimension vector.

mod error;
pub mod genai_client;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::EmbeddingError;
pub use genai_client::GenAiEmbedder;

#[cfg(any(test, feature = "mock"))]
pub use mock::StubEmbedder;

use async_trait::async_trait;

/// Produces the vector representation of a prompt. Must error rather than return an
/// empty vector — the orchestrator treats a zero-length embedding as fatal.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn create_embedding(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
