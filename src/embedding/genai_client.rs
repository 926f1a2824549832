use async_trait::async_trait;
use genai::Client;

use super::error::EmbeddingError;
use super::Embedder;

/// [`Embedder`] backed by the `genai` crate's embeddings endpoint (`text-embedding-004`
/// by default).
pub struct GenAiEmbedder {
    client: Client,
    model: String,
}

impl GenAiEmbedder {
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Embedder for GenAiEmbedder {
    async fn create_embedding(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let response = self
            .client
            .embed(&self.model, text, None)
            .await
            .map_err(|e| EmbeddingError::RequestFailed {
                reason: e.to_string(),
            })?;

        let vector = response
            .first_embedding()
            .map(|embedding| embedding.vector().to_vec())
            .unwrap_or_default();

        if vector.is_empty() {
            return Err(EmbeddingError::EmptyEmbedding);
        }

        Ok(vector)
    }
}
