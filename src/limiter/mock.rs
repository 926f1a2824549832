//! In-memory [`TokenLimiter`] fake.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::error::LimiterError;
use super::TokenLimiter;

/// An in-memory usage counter with a fixed per-user cap, for tests and the `mock`
/// feature. Can be seeded directly via [`InMemoryLimiter::seed`] to reproduce
/// "already over budget" scenarios without a round trip through `increment`.
#[derive(Default)]
pub struct InMemoryLimiter {
    cap: u64,
    usage: RwLock<HashMap<String, u64>>,
}

impl InMemoryLimiter {
    pub fn new(cap: u64) -> Self {
        Self {
            cap,
            usage: RwLock::new(HashMap::new()),
        }
    }

    pub fn seed(&self, user_id: &str, usage: u64) {
        self.usage
            .write()
            .expect("lock poisoned")
            .insert(user_id.to_string(), usage);
    }

    pub fn usage_for(&self, user_id: &str) -> u64 {
        *self
            .usage
            .read()
            .expect("lock poisoned")
            .get(user_id)
            .unwrap_or(&0)
    }
}

#[async_trait]
impl TokenLimiter for InMemoryLimiter {
    async fn check_limit(&self, user_id: &str) -> Result<bool, LimiterError> {
        let usage = self.usage_for(user_id);
        Ok(usage < self.cap)
    }

    async fn increment(&self, user_id: &str, tokens: u64) -> Result<(), LimiterError> {
        let mut map = self.usage.write().expect("lock poisoned");
        *map.entry(user_id.to_string()).or_insert(0) += tokens;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_key_is_allowed() {
        let limiter = InMemoryLimiter::new(100);
        assert!(limiter.check_limit("u1").await.unwrap());
    }

    #[tokio::test]
    async fn over_cap_is_denied() {
        let limiter = InMemoryLimiter::new(100);
        limiter.seed("u1", 101);
        assert!(!limiter.check_limit("u1").await.unwrap());
    }

    #[tokio::test]
    async fn increment_accumulates() {
        let limiter = InMemoryLimiter::new(100);
        limiter.increment("u1", 10).await.unwrap();
        limiter.increment("u1", 5).await.unwrap();
        assert_eq!(limiter.usage_for("u1"), 15);
    }

    #[tokio::test]
    async fn increment_by_zero_is_a_noop_not_a_skip() {
        let limiter = InMemoryLimiter::new(100);
        limiter.increment("u1", 0).await.unwrap();
        assert_eq!(limiter.usage_for("u1"), 0);
    }
}
