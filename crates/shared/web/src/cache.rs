//! Redis cache for lookup data and rate limiting.

use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use common::{AppError, AppResult};

/// Default cache TTL in seconds (1 hour)
pub const DEFAULT_CACHE_TTL: u64 = 3600;

const CACHE_PREFIX_RATE_LIMIT: &str = "rate_limit:";

/// Redis cache wrapper.
pub struct Cache {
    conn: ConnectionManager,
}

impl Cache {
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    // =========================================================================
    // Generic Cache Operations
    // =========================================================================

    /// Get a JSON value. Undecodable entries count as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.conn.clone();
        let result: Option<String> = conn.get(key).await.map_err(|e| {
            warn!("Redis get error for key {}: {}", key, e);
            AppError::from(e)
        })?;

        match result {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!("Failed to deserialize cached value for key {}: {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Serialization error: {}", e)))?;
        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(|e| {
                warn!("Redis set error for key {}: {}", key, e);
                AppError::from(e)
            })?;
        Ok(())
    }

    /// Remaining lifetime of `key` in seconds, `None` if absent or persistent.
    pub async fn ttl(&self, key: &str) -> AppResult<Option<i64>> {
        let mut conn = self.conn.clone();
        let ttl: i64 = conn.ttl(key).await?;
        Ok((ttl >= 0).then_some(ttl))
    }

    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    // =========================================================================
    // Rate Limiting
    // =========================================================================

    /// Fixed-window counter. Returns (current_count, allowed).
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = rate_limit_key(identifier);
        let mut conn = self.conn.clone();

        let count: u64 = conn.incr(&key, 1).await?;
        if count == 1 {
            conn.expire::<_, ()>(&key, window_seconds as i64).await?;
        }

        Ok((count, count <= max_requests))
    }

    pub async fn get_rate_limit_ttl(&self, identifier: &str) -> AppResult<Option<i64>> {
        self.ttl(&rate_limit_key(identifier)).await
    }
}

fn rate_limit_key(identifier: &str) -> String {
    format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier)
}
