use async_trait::async_trait;
use moka::Expiry;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Key/value cache injected into the recipe source
///
/// Values are serialized JSON. Backend failures are reported as misses so a
/// broken cache never changes results, only latency.
#[async_trait]
pub trait RecipeCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, value: String, ttl: Duration);
}

/// Cache that stores nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl RecipeCache for NoopCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) {}
}

#[derive(Clone)]
struct CachedValue {
    json: Arc<str>,
    ttl: Duration,
}

/// Expires each L1 entry after the TTL it was written with
struct PerEntryTtl;

impl Expiry<String, CachedValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Multi-tier cache manager
///
/// L1 is an in-process moka cache, L2 an optional Redis instance shared
/// across replicas. Without Redis the manager runs on L1 alone.
pub struct CacheManager {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, CachedValue>,
    /// TTL for L1 entries backfilled from Redis
    backfill_ttl: Duration,
}

impl CacheManager {
    /// Create a cache manager, connecting to Redis when a URL is given
    pub async fn new(
        redis_url: Option<&str>,
        l1_size: u64,
        backfill_ttl: Duration,
    ) -> Result<Self, CacheError> {
        let redis = match redis_url {
            Some(url) => {
                let client = redis::Client::open(url)?;
                let manager = ConnectionManager::new(client).await?;
                Some(Arc::new(tokio::sync::Mutex::new(manager)))
            }
            None => None,
        };

        Ok(Self {
            redis,
            l1_cache: Self::build_l1(l1_size),
            backfill_ttl,
        })
    }

    /// L1-only cache manager
    pub fn in_memory(l1_size: u64) -> Self {
        Self {
            redis: None,
            l1_cache: Self::build_l1(l1_size),
            backfill_ttl: Duration::ZERO,
        }
    }

    fn build_l1(l1_size: u64) -> moka::future::Cache<String, CachedValue> {
        moka::future::Cache::builder()
            .max_capacity(l1_size)
            .expire_after(PerEntryTtl)
            .build()
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn try_get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if let Some(value) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(Some(value.json.to_string()));
        }

        let Some(redis) = &self.redis else {
            tracing::trace!("Cache miss: {}", key);
            return Ok(None);
        };

        let mut conn = redis.lock().await;
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut *conn).await?;
        drop(conn);

        if let Some(json) = &value {
            tracing::trace!("L2 cache hit: {}", key);
            if !self.backfill_ttl.is_zero() {
                self.l1_cache
                    .insert(
                        key.to_string(),
                        CachedValue {
                            json: Arc::from(json.as_str()),
                            ttl: self.backfill_ttl,
                        },
                    )
                    .await;
            }
        } else {
            tracing::trace!("Cache miss: {}", key);
        }

        Ok(value)
    }

    /// Set a value in cache (both L1 and L2) with an explicit TTL
    pub async fn try_set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        if ttl.is_zero() {
            return Ok(());
        }

        self.l1_cache
            .insert(
                key.to_string(),
                CachedValue {
                    json: Arc::from(value),
                    ttl,
                },
            )
            .await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(key)
                .arg(ttl.as_secs().max(1))
                .arg(value)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.l1_cache.entry_count(),
            redis_enabled: self.redis.is_some(),
        }
    }
}

#[async_trait]
impl RecipeCache for CacheManager {
    async fn get(&self, key: &str) -> Option<String> {
        match self.try_get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Cache read failed for {}, treating as miss: {}", key, e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) {
        if let Err(e) = self.try_set(key, &value, ttl).await {
            tracing::warn!("Cache write failed for {}: {}", key, e);
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub l1_size: u64,
    pub redis_enabled: bool,
}

/// Cache key builder
///
/// Keys carry the query value exactly as it is sent upstream, so two
/// requests share an entry only when they would hit the same URL.
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a category listing
    pub fn category(category: &str) -> String {
        format!("mealdb:category:{}", category)
    }

    /// Build a cache key for an area listing
    pub fn area(area: &str) -> String {
        format!("mealdb:area:{}", area)
    }

    /// Build a cache key for a main-ingredient listing
    pub fn ingredient(ingredient: &str) -> String {
        format!("mealdb:ingredient:{}", ingredient)
    }

    /// Build a cache key for a name search
    pub fn search(query: &str) -> String {
        format!("mealdb:search:{}", query)
    }

    /// Build a cache key for a first-letter listing
    pub fn first_letter(letter: &str) -> String {
        format!("mealdb:letter:{}", letter)
    }

    /// Build a cache key for a full recipe record
    pub fn lookup(id: &str) -> String {
        format!("mealdb:lookup:{}", id)
    }

    /// Build a cache key for one of the reference lists (categories, areas, ingredients)
    pub fn list(name: &str) -> String {
        format!("mealdb:list:{}", name)
    }
}
