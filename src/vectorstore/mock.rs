//! In-memory [`VectorStore`] fake, used by tests and the `mock` feature.

use std::sync::RwLock;

use async_trait::async_trait;

use super::error::VectorStoreError;
use super::{SearchFilter, VectorStore};
use crate::model::{CacheEntry, SearchHit};

struct StoredEntry {
    vector: Vec<f32>,
    prompt: String,
    content: String,
    user_id: String,
    created_at: i64,
    extra: std::collections::HashMap<String, String>,
}

/// A process-local [`VectorStore`] backed by a `Vec` under a lock. Linear scan is fine
/// at test scale; it exists to exercise orchestrator behavior, not to benchmark search.
#[derive(Default)]
pub struct InMemoryVectorStore {
    entries: RwLock<Vec<StoredEntry>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn init_collection(&self, _dim: usize) -> Result<(), VectorStoreError> {
        Ok(())
    }

    async fn search(
        &self,
        vector: &[f32],
        threshold: f32,
        filter: &SearchFilter,
    ) -> Result<Option<SearchHit>, VectorStoreError> {
        let entries = self.entries.read().expect("lock poisoned");

        let best = entries
            .iter()
            .filter(|e| e.created_at >= filter.created_after)
            .filter(|e| {
                filter
                    .equals
                    .iter()
                    .all(|(k, v)| e.extra.get(k).is_some_and(|stored| stored == v))
            })
            .map(|e| (e, cosine_similarity(vector, &e.vector)))
            .filter(|(_, score)| *score >= threshold)
            .max_by(|(_, a), (_, b)| a.total_cmp(b));

        Ok(best.map(|(e, score)| SearchHit {
            prompt: e.prompt.clone(),
            content: e.content.clone(),
            score,
        }))
    }

    async fn save(&self, entry: &CacheEntry) -> Result<(), VectorStoreError> {
        let mut entries = self.entries.write().expect("lock poisoned");
        entries.push(StoredEntry {
            vector: entry.vector.clone(),
            prompt: entry.prompt.clone(),
            content: entry.content.clone(),
            user_id: entry.user_id.clone(),
            created_at: entry.created_at,
            extra: {
                let mut extra = entry.extra.clone();
                extra.insert("user_id".to_string(), entry.user_id.clone());
                extra
            },
        });
        Ok(())
    }
}

/// Cosine similarity between two equal-length vectors. Returns `0.0` for zero-norm
/// input rather than dividing by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry(user_id: &str, vector: Vec<f32>, created_at: i64) -> CacheEntry {
        CacheEntry {
            id: Uuid::new_v4(),
            vector,
            prompt: "what is the capital of france".to_string(),
            content: "Paris".to_string(),
            user_id: user_id.to_string(),
            created_at,
            extra: std::collections::HashMap::new(),
        }
    }

    #[tokio::test]
    async fn search_respects_user_id_scoping() {
        let store = InMemoryVectorStore::new();
        store.save(&entry("u1", vec![1.0, 0.0], 1_000)).await.unwrap();

        let mut filter = SearchFilter::default();
        filter.equals.insert("user_id".to_string(), "u2".to_string());
        filter.created_after = 0;

        let hit = store.search(&[1.0, 0.0], 0.75, &filter).await.unwrap();
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn search_excludes_stale_entries() {
        let store = InMemoryVectorStore::new();
        store.save(&entry("u1", vec![1.0, 0.0], 1_000)).await.unwrap();

        let mut filter = SearchFilter::default();
        filter.equals.insert("user_id".to_string(), "u1".to_string());
        filter.created_after = 2_000;

        let hit = store.search(&[1.0, 0.0], 0.75, &filter).await.unwrap();
        assert!(hit.is_none());
    }

    #[test]
    fn cosine_similarity_identical_vectors_is_one() {
        assert!((cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_similarity_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
