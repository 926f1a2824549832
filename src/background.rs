//! Fire-and-forget persistence triggered by a successful cache-miss generation.
//!
//! The write runs on an independent, uncancelled `tokio::spawn` task: request
//! cancellation drops the caller's future, not this one, so a client disconnect never
//! discards work the provider has already been paid for.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::constants::BACKGROUND_WRITE_TIMEOUT;
use crate::limiter::TokenLimiter;
use crate::model::CacheEntry;
use crate::vectorstore::VectorStore;

pub struct BackgroundWriter {
    vector_store: Arc<dyn VectorStore>,
    limiter: Arc<dyn TokenLimiter>,
}

impl BackgroundWriter {
    pub fn new(vector_store: Arc<dyn VectorStore>, limiter: Arc<dyn TokenLimiter>) -> Self {
        Self {
            vector_store,
            limiter,
        }
    }

    /// Enqueues the cache-save and usage-increment for `user_id`, detached from the
    /// caller. `extracted_metadata` and `caller_metadata` are merged with caller
    /// metadata winning on key collision; a `user_id` key in either map is dropped
    /// before the merge reaches `extra`, so a caller can never spoof the owning user.
    pub fn spawn(
        &self,
        user_id: String,
        prompt: String,
        content: String,
        vector: Vec<f32>,
        token_count: u32,
        extracted_metadata: HashMap<String, String>,
        caller_metadata: HashMap<String, String>,
    ) -> tokio::task::JoinHandle<()> {
        let vector_store = Arc::clone(&self.vector_store);
        let limiter = Arc::clone(&self.limiter);

        tokio::spawn(async move {
            let mut extra = extracted_metadata;
            extra.extend(caller_metadata);
            extra.remove("user_id");

            let entry = CacheEntry {
                id: Uuid::new_v4(),
                vector,
                prompt,
                content,
                user_id: user_id.clone(),
                created_at: Utc::now().timestamp(),
                extra,
            };

            let save = async {
                if let Err(e) = vector_store.save(&entry).await {
                    warn!(error = %e, "background cache save failed");
                }
            };

            let increment = async {
                if let Err(e) = limiter.increment(&user_id, token_count as u64).await {
                    warn!(error = %e, "background usage increment failed");
                }
            };

            let bounded = async {
                tokio::join!(save, increment);
            };

            if tokio::time::timeout(BACKGROUND_WRITE_TIMEOUT, bounded)
                .await
                .is_err()
            {
                warn!("background write-through exceeded its deadline");
            }
        })
    }
}
