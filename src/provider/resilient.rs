use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use serde_json::json;
use tokio::time::{sleep, sleep_until, timeout_at};

use super::error::ProviderError;
use super::AIProvider;
use crate::constants::{
    PROVIDER_BASE_DELAY, PROVIDER_GLOBAL_TIMEOUT, PROVIDER_JITTER_FRACTION, PROVIDER_MAX_RETRIES,
};
use crate::model::Response;

/// Wraps `primary` and `fallback` behind a single [`AIProvider`]-shaped interface:
/// up to `max_retries + 1` attempts on the primary with jittered exponential backoff,
/// then one fallback attempt, all under a single wall-clock ceiling.
pub struct ResilientProvider {
    primary: Arc<dyn AIProvider>,
    fallback: Arc<dyn AIProvider>,
    max_retries: u32,
    base_delay: Duration,
    global_timeout: Duration,
}

impl ResilientProvider {
    pub fn new(primary: Arc<dyn AIProvider>, fallback: Arc<dyn AIProvider>) -> Self {
        Self {
            primary,
            fallback,
            max_retries: PROVIDER_MAX_RETRIES,
            base_delay: PROVIDER_BASE_DELAY,
            global_timeout: PROVIDER_GLOBAL_TIMEOUT,
        }
    }

    /// Builds a provider with non-default retry parameters, used by tests that assert
    /// on backoff timing without waiting out the full 25 s ceiling.
    pub fn with_params(
        primary: Arc<dyn AIProvider>,
        fallback: Arc<dyn AIProvider>,
        max_retries: u32,
        base_delay: Duration,
        global_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            max_retries,
            base_delay,
            global_timeout,
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.as_secs_f64() * 2f64.powi(attempt as i32);
        let jitter = rand::rng().random_range(0.0..PROVIDER_JITTER_FRACTION);
        Duration::from_secs_f64(exp * (1.0 + jitter))
    }

    pub async fn generate(&self, prompt: &str) -> Result<Response, ProviderError> {
        let deadline = Instant::now() + self.global_timeout;

        let mut last_err = ProviderError::Upstream("primary never attempted".to_string());

        for attempt in 0..=self.max_retries {
            match timeout_at(deadline.into(), self.primary.generate(prompt)).await {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err(err)) => {
                    last_err = err;
                    let exhausted = attempt == self.max_retries;
                    if exhausted || !last_err.is_retryable() {
                        break;
                    }

                    let backoff = self.backoff(attempt);
                    tokio::select! {
                        _ = sleep(backoff) => {}
                        _ = sleep_until(deadline.into()) => {
                            return Err(ProviderError::DeadlineExceeded);
                        }
                    }
                }
                Err(_elapsed) => return Err(ProviderError::DeadlineExceeded),
            }
        }

        match timeout_at(deadline.into(), self.fallback.generate(prompt)).await {
            Ok(Ok(mut response)) => {
                response.metadata.insert("fallback_used".to_string(), json!(true));
                response.metadata.insert("retry_count".to_string(), json!(0));
                Ok(response)
            }
            Ok(Err(fallback_err)) => Err(ProviderError::BothFailed {
                primary: last_err.to_string(),
                fallback: fallback_err.to_string(),
            }),
            Err(_elapsed) => Err(ProviderError::DeadlineExceeded),
        }
    }
}

#[async_trait::async_trait]
impl AIProvider for ResilientProvider {
    async fn generate(&self, prompt: &str) -> Result<Response, ProviderError> {
        ResilientProvider::generate(self, prompt).await
    }
}
