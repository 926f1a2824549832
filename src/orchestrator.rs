//! Ties the six capability ports and the cache lookup together into the single
//! request-handling algorithm the HTTP layer calls into.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::background::BackgroundWriter;
use crate::cache::CacheLookup;
use crate::embedding::Embedder;
use crate::error::SentinelError;
use crate::extractor::Extractor;
use crate::limiter::TokenLimiter;
use crate::model::{Request, Response};
use crate::provider::AIProvider;

/// Wires a user request through budget enforcement, metadata extraction, the
/// semantic cache, and (on a miss) a resilient provider call, then enqueues the
/// write-through for the next request to find.
pub struct Orchestrator {
    limiter: Arc<dyn TokenLimiter>,
    extractor: Arc<dyn Extractor>,
    embedder: Arc<dyn Embedder>,
    cache: CacheLookup,
    provider: Arc<dyn AIProvider>,
    writer: BackgroundWriter,
}

impl Orchestrator {
    pub fn new(
        limiter: Arc<dyn TokenLimiter>,
        extractor: Arc<dyn Extractor>,
        embedder: Arc<dyn Embedder>,
        cache: CacheLookup,
        provider: Arc<dyn AIProvider>,
        writer: BackgroundWriter,
    ) -> Self {
        Self {
            limiter,
            extractor,
            embedder,
            cache,
            provider,
            writer,
        }
    }

    /// Runs the full request pipeline described in the design: budget gate,
    /// best-effort metadata extraction, fatal embedding, cache lookup, and — on a
    /// miss — a resilient generation with a detached write-through enqueued before
    /// returning.
    pub async fn execute(&self, request: &Request) -> Result<Response, SentinelError> {
        if !request.is_valid() {
            return Err(SentinelError::InvalidRequest {
                reason: "user_id and prompt must be non-empty".to_string(),
            });
        }

        let allowed = self.limiter.check_limit(&request.user_id).await.unwrap_or_else(|e| {
            warn!(error = %e, "limiter transport error, failing closed");
            false
        });
        if !allowed {
            return Err(SentinelError::RateLimitExceeded);
        }

        let extracted_metadata = self.extractor.extract_metadata(&request.prompt).await;

        let vector = self
            .embedder
            .create_embedding(&request.prompt)
            .await
            .map_err(|e| SentinelError::EmbeddingFailed { reason: e.to_string() })?;
        if vector.is_empty() {
            return Err(SentinelError::EmbeddingFailed {
                reason: "embedder returned an empty vector".to_string(),
            });
        }

        if let Some(hit) = self
            .cache
            .lookup(
                &request.user_id,
                &request.prompt,
                &vector,
                &extracted_metadata,
                request.timestamp,
            )
            .await
        {
            info!(user_id = %request.user_id, score = hit.score, "cache hit");
            return Ok(Response {
                content: hit.content,
                cached: true,
                score: hit.score,
                model: request.model.clone(),
                token_count: 0,
                cost: 0.0,
                latency_ms: 0,
                metadata: HashMap::new(),
            });
        }

        let response = self
            .provider
            .generate(&request.prompt)
            .await
            .map_err(|e| SentinelError::GenerationFailed { reason: e.to_string() })?;

        self.writer.spawn(
            request.user_id.clone(),
            request.prompt.clone(),
            response.content.clone(),
            vector,
            response.token_count,
            extracted_metadata,
            request.metadata.clone(),
        );

        Ok(response)
    }
}
