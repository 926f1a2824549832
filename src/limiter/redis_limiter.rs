use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use super::error::LimiterError;
use super::{TokenLimiter, usage_key};

/// Redis-backed [`TokenLimiter`]. Counters are plain `INCRBY` accumulators under
/// `usage:<user_id>` with no expiry — the budget never resets on its own.
pub struct RedisLimiter {
    conn: ConnectionManager,
    cap: u64,
}

impl RedisLimiter {
    pub async fn connect(url: &str, cap: u64) -> Result<Self, LimiterError> {
        let client = redis::Client::open(url).map_err(|e| LimiterError::Transport(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| LimiterError::Transport(e.to_string()))?;

        Ok(Self { conn, cap })
    }
}

#[async_trait]
impl TokenLimiter for RedisLimiter {
    async fn check_limit(&self, user_id: &str) -> Result<bool, LimiterError> {
        let mut conn = self.conn.clone();
        let usage: Option<u64> = conn
            .get(usage_key(user_id))
            .await
            .map_err(|e| LimiterError::Transport(e.to_string()))?;

        Ok(match usage {
            None => true,
            Some(used) => used < self.cap,
        })
    }

    async fn increment(&self, user_id: &str, tokens: u64) -> Result<(), LimiterError> {
        let mut conn = self.conn.clone();
        let _: u64 = conn
            .incr(usage_key(user_id), tokens)
            .await
            .map_err(|e| LimiterError::Transport(e.to_string()))?;
        Ok(())
    }
}
