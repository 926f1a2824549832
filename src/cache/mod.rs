//! Two-tier semantic cache lookup: a threshold-filtered vector search followed by an
//! LLM-judge disambiguation step over the "ambiguity zone".


use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::constants::{AMBIGUITY_FLOOR, FRESHNESS_WINDOW, TIER1_AUTO_ACCEPT_THRESHOLD};
use crate::evaluator::Evaluator;
use crate::model::SearchHit;
use crate::vectorstore::{SearchFilter, VectorStore};

/// Performs the metadata-scoped, two-tier lookup described in the design.
pub struct CacheLookup {
    vector_store: Arc<dyn VectorStore>,
    evaluator: Arc<dyn Evaluator>,
}

impl CacheLookup {
    pub fn new(vector_store: Arc<dyn VectorStore>, evaluator: Arc<dyn Evaluator>) -> Self {
        Self {
            vector_store,
            evaluator,
        }
    }

    /// Looks up a cached answer for `prompt`/`vector`, scoped to `user_id` and the
    /// extractor's output (never the caller-supplied `request.metadata` — see the
    /// design note on the asymmetry between lookup scoping and persisted metadata).
    ///
    /// Returns `None` on a clean miss, on a rejected judge call, and on a vector-store
    /// transport error (logged here, never propagated).
    pub async fn lookup(
        &self,
        user_id: &str,
        prompt: &str,
        vector: &[f32],
        extracted_metadata: &HashMap<String, String>,
        now: DateTime<Utc>,
    ) -> Option<SearchHit> {
        let mut equals = extracted_metadata.clone();
        equals.insert("user_id".to_string(), user_id.to_string());

        let filter = SearchFilter {
            equals,
            created_after: now.timestamp() - FRESHNESS_WINDOW.as_secs() as i64,
        };

        let hit = match self.vector_store.search(vector, AMBIGUITY_FLOOR, &filter).await {
            Ok(hit) => hit?,
            Err(e) => {
                warn!(error = %e, "vector store search failed, treating as a cache miss");
                return None;
            }
        };

        if hit.score > TIER1_AUTO_ACCEPT_THRESHOLD {
            return Some(hit);
        }

        debug_assert!(hit.score >= AMBIGUITY_FLOOR);
        if self.evaluator.is_match(prompt, &hit.prompt).await {
            Some(hit)
        } else {
            None
        }
    }
}
