//! `TokenLimiter` capability port: per-user token budget enforcement.

pub mod error;
pub mod redis_limiter;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::LimiterError;
pub use redis_limiter::RedisLimiter;

#[cfg(any(test, feature = "mock"))]
pub use mock::InMemoryLimiter;

use async_trait::async_trait;

/// Prefix under which per-user usage counters live, e.g. `usage:alice`.
pub const USAGE_KEY_PREFIX: &str = "usage:";

pub fn usage_key(user_id: &str) -> String {
    format!("{USAGE_KEY_PREFIX}{user_id}")
}

/// The per-user token budget counter.
///
/// Absent key means no usage recorded yet, which is "allowed". There is no TTL or
/// windowing — the counter only grows — matching the source system's behavior (see
/// the "Open questions" note in the design doc).
#[async_trait]
pub trait TokenLimiter: Send + Sync {
    /// `true` iff `user_id`'s accumulated usage is strictly less than the configured cap.
    async fn check_limit(&self, user_id: &str) -> Result<bool, LimiterError>;

    /// Atomically adds `tokens` to `user_id`'s counter.
    async fn increment(&self, user_id: &str, tokens: u64) -> Result<(), LimiterError>;
}
