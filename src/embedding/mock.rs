//! Deterministic [`Embedder`] fake.

use async_trait::async_trait;

use super::error::EmbeddingError;
use super::Embedder;
use crate::constants::DEFAULT_EMBEDDING_DIM;

/// Hashes the input text into a fixed-dimension vector deterministically, so that
/// identical prompts produce identical (and near-identical prompts produce similar)
/// vectors without a real model. Good enough to exercise threshold/judge logic in
/// tests; not a real semantic embedding.
pub struct StubEmbedder {
    dim: usize,
}

impl StubEmbedder {
    pub fn new() -> Self {
        Self {
            dim: DEFAULT_EMBEDDING_DIM,
        }
    }

    pub fn with_dim(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn create_embedding(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::EmptyEmbedding);
        }

        let normalized = text.trim().to_lowercase();
        let mut vector = vec![0.0f32; self.dim];
        for (i, byte) in normalized.bytes().enumerate() {
            vector[i % self.dim] += byte as f32;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Ok(vector)
    }
}
