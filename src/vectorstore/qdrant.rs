use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, CreateFieldIndexCollectionBuilder, Distance, FieldType,
    Filter, PointStruct, Range, SearchPointsBuilder, UpsertPointsBuilder, Value as QdrantValue,
    VectorParamsBuilder,
};

use super::error::VectorStoreError;
use super::{SearchFilter, VectorStore};
use crate::model::{CacheEntry, SearchHit};

/// Direct Qdrant client wrapper backing the [`VectorStore`] port.
pub struct QdrantVectorStore {
    client: Qdrant,
    collection: String,
    dim: AtomicUsize,
}

impl QdrantVectorStore {
    /// Creates a store for `collection` at `url`. Does not touch the network.
    pub fn new(url: &str, collection: impl Into<String>) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            collection: collection.into(),
            dim: AtomicUsize::new(0),
        })
    }

    fn configured_dim(&self) -> usize {
        self.dim.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn init_collection(&self, dim: usize) -> Result<(), VectorStoreError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| VectorStoreError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        if !exists {
            let vectors_config = VectorParamsBuilder::new(dim as u64, Distance::Cosine);
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(vectors_config)
                        .on_disk_payload(true),
                )
                .await
                .map_err(|e| VectorStoreError::CreateCollectionFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;

            self.client
                .create_field_index(CreateFieldIndexCollectionBuilder::new(
                    &self.collection,
                    "created_at",
                    FieldType::Integer,
                ))
                .await
                .map_err(|e| VectorStoreError::CreateCollectionFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;
        }

        self.dim.store(dim, Ordering::Relaxed);
        Ok(())
    }

    async fn search(
        &self,
        vector: &[f32],
        threshold: f32,
        filter: &SearchFilter,
    ) -> Result<Option<SearchHit>, VectorStoreError> {
        let mut conditions: Vec<Condition> = filter
            .equals
            .iter()
            .map(|(key, value)| Condition::matches(key.clone(), value.clone()))
            .collect();
        conditions.push(Condition::range(
            "created_at",
            Range {
                gte: Some(filter.created_after as f64),
                ..Default::default()
            },
        ));

        let search_builder = SearchPointsBuilder::new(&self.collection, vector.to_vec(), 1)
            .filter(Filter::must(conditions))
            .score_threshold(threshold)
            .with_payload(true);

        let result = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| VectorStoreError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let Some(point) = result.result.into_iter().next() else {
            return Ok(None);
        };

        let payload = point.payload;
        let prompt = payload_string(&payload, "prompt").unwrap_or_default();
        let content = payload_string(&payload, "content").unwrap_or_default();

        Ok(Some(SearchHit {
            prompt,
            content,
            score: point.score,
        }))
    }

    async fn save(&self, entry: &CacheEntry) -> Result<(), VectorStoreError> {
        let expected = self.configured_dim();
        if expected != 0 && entry.vector.len() != expected {
            return Err(VectorStoreError::InvalidDimension {
                expected,
                actual: entry.vector.len(),
            });
        }

        let mut payload: HashMap<String, QdrantValue> = HashMap::new();
        payload.insert("prompt".to_string(), entry.prompt.clone().into());
        payload.insert("content".to_string(), entry.content.clone().into());
        payload.insert("created_at".to_string(), entry.created_at.into());
        for (key, value) in &entry.extra {
            payload.insert(key.clone(), value.clone().into());
        }
        // Inserted last: entry.extra must never be able to spoof the owning user_id.
        payload.insert("user_id".to_string(), entry.user_id.clone().into());

        let point = PointStruct::new(entry.id.to_string(), entry.vector.clone(), payload);

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]).wait(false))
            .await
            .map_err(|e| VectorStoreError::UpsertFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

fn payload_string(payload: &HashMap<String, QdrantValue>, key: &str) -> Option<String> {
    payload.get(key).and_then(|v| v.as_str()).map(String::from)
}
