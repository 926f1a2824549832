//! `VectorStore` capability port: the semantic cache's backing index.
//!
//! [`qdrant`] is the production implementation against a real Qdrant collection.
//! [`mock`] is an in-memory fake used by tests and the `mock` feature.

pub mod error;
pub mod qdrant;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::VectorStoreError;
pub use qdrant::QdrantVectorStore;

#[cfg(any(test, feature = "mock"))]
pub use mock::InMemoryVectorStore;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::model::{CacheEntry, SearchHit};

/// A filter restricting [`VectorStore::search`] to a subset of entries.
///
/// `equals` conditions come from the request's `user_id` and the extractor's output
/// (see `crate::cache`); `created_after` is the freshness-window cutoff expressed as
/// Unix seconds.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub equals: HashMap<String, String>,
    pub created_after: i64,
}

/// The semantic cache's vector index.
///
/// Every method here is a narrow, single-purpose RPC boundary — the orchestrator
/// never reaches past this trait into Qdrant specifics.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Idempotently ensures the collection exists with the given vector dimension and
    /// cosine distance. Both "already existed" and "just created" are success.
    async fn init_collection(&self, dim: usize) -> Result<(), VectorStoreError>;

    /// Returns the single nearest neighbor at or above `threshold` under `filter`, or
    /// `None` on a clean miss. Transport errors are the caller's responsibility to
    /// recover from (the orchestrator logs and treats them as a miss).
    async fn search(
        &self,
        vector: &[f32],
        threshold: f32,
        filter: &SearchFilter,
    ) -> Result<Option<SearchHit>, VectorStoreError>;

    /// Upserts a new cache entry.
    async fn save(&self, entry: &CacheEntry) -> Result<(), VectorStoreError>;
}
