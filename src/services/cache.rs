use async_trait::async_trait;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use crate::models::{NewProvider, Provider, ProviderId};
use crate::services::store::{ProviderSource, ProviderStore, StoreError};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Multi-tier cache manager
///
/// Implements L1 (in-memory) and optional L2 (Redis) caching.
/// L1 is fastest but local to the process, L2 is shared across instances.
pub struct CacheManager {
    // Store ConnectionManager in a Mutex for interior mutability
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a cache manager backed by Redis
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
            l1_cache: build_l1(l1_size, ttl_secs),
            ttl_secs,
        })
    }

    /// Create an L1-only cache manager
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        Self {
            redis: None,
            l1_cache: build_l1(l1_size, ttl_secs),
            ttl_secs,
        }
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let value: Option<String> = redis::cmd("GET")
                .arg(key)
                .query_async(&mut *conn)
                .await?;
            drop(conn);

            if let Some(json) = value {
                tracing::trace!("L2 cache hit: {}", key);

                // Populate L1 cache
                let bytes = json.as_bytes().to_vec();
                self.l1_cache.insert(key.to_string(), bytes).await;

                return Ok(serde_json::from_str(&json)?);
            }
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in cache (both tiers)
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache
            .insert(key.to_string(), json.as_bytes().to_vec())
            .await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from both cache tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.l1_cache.entry_count(),
            l2_enabled: self.redis.is_some(),
        }
    }
}

fn build_l1(l1_size: u64, ttl_secs: u64) -> moka::future::Cache<String, Vec<u8>> {
    moka::future::CacheBuilder::new(l1_size)
        .time_to_live(Duration::from_secs(ttl_secs))
        .build()
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
    pub l2_enabled: bool,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build the cache key for the full provider snapshot
    pub fn provider_snapshot() -> String {
        "providers:all".to_string()
    }

    /// Build a cache key for a single provider
    pub fn provider(id: ProviderId) -> String {
        format!("provider:{}", id)
    }
}

/// Provider store decorator that caches snapshots
///
/// Cache failures are logged and the inner store is used instead.
/// Creating a provider invalidates the snapshot. A snapshot read from the
/// inner store while a create was in flight is dropped from the cache
/// after it is written, so it never outlives the create.
pub struct CachedProviderStore<S> {
    inner: S,
    cache: Arc<CacheManager>,
    // Bumped on every create
    generation: AtomicU64,
}

impl<S: ProviderStore> CachedProviderStore<S> {
    pub fn new(inner: S, cache: Arc<CacheManager>) -> Self {
        Self {
            inner,
            cache,
            generation: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ProviderStore> ProviderSource for CachedProviderStore<S> {
    async fn list_providers(&self) -> Result<Vec<Provider>, StoreError> {
        let key = CacheKey::provider_snapshot();

        match self.cache.get::<Vec<Provider>>(&key).await {
            Ok(providers) => return Ok(providers),
            Err(CacheError::CacheMiss(_)) => {}
            Err(e) => tracing::warn!("Provider snapshot cache read failed: {}", e),
        }

        let generation = self.generation.load(Ordering::Acquire);
        let providers = self.inner.list_providers().await?;

        if let Err(e) = self.cache.set(&key, &providers).await {
            tracing::warn!("Failed to cache provider snapshot: {}", e);
        }

        if self.generation.load(Ordering::Acquire) != generation {
            tracing::debug!("Provider created during snapshot read, dropping cached snapshot");
            if let Err(e) = self.cache.delete(&key).await {
                tracing::warn!("Failed to invalidate provider snapshot: {}", e);
            }
        }

        Ok(providers)
    }
}

#[async_trait]
impl<S: ProviderStore> ProviderStore for CachedProviderStore<S> {
    async fn get_provider(&self, id: ProviderId) -> Result<Option<Provider>, StoreError> {
        let key = CacheKey::provider(id);

        match self.cache.get::<Provider>(&key).await {
            Ok(provider) => return Ok(Some(provider)),
            Err(CacheError::CacheMiss(_)) => {}
            Err(e) => tracing::warn!("Provider cache read failed: {}", e),
        }

        let provider = self.inner.get_provider(id).await?;

        if let Some(provider) = &provider {
            if let Err(e) = self.cache.set(&key, provider).await {
                tracing::warn!("Failed to cache provider {}: {}", id, e);
            }
        }

        Ok(provider)
    }

    async fn create_provider(&self, provider: NewProvider) -> Result<Provider, StoreError> {
        let created = self.inner.create_provider(provider).await?;
        self.generation.fetch_add(1, Ordering::AcqRel);

        if let Err(e) = self.cache.delete(&CacheKey::provider_snapshot()).await {
            tracing::warn!("Failed to invalidate provider snapshot: {}", e);
        }

        Ok(created)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::MemoryProviderStore;
    use crate::services::seed::sample_providers;
    use tokio::sync::{oneshot, Mutex};

    /// Memory store whose first snapshot read pauses after reading
    struct PausingStore {
        inner: MemoryProviderStore,
        read_done: Mutex<Option<oneshot::Sender<()>>>,
        resume: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl ProviderSource for PausingStore {
        async fn list_providers(&self) -> Result<Vec<Provider>, StoreError> {
            let providers = self.inner.list_providers().await?;

            if let Some(read_done) = self.read_done.lock().await.take() {
                let _ = read_done.send(());
                if let Some(resume) = self.resume.lock().await.take() {
                    let _ = resume.await;
                }
            }

            Ok(providers)
        }
    }

    #[async_trait]
    impl ProviderStore for PausingStore {
        async fn get_provider(&self, id: ProviderId) -> Result<Option<Provider>, StoreError> {
            self.inner.get_provider(id).await
        }

        async fn create_provider(&self, provider: NewProvider) -> Result<Provider, StoreError> {
            self.inner.create_provider(provider).await
        }

        async fn health_check(&self) -> Result<bool, StoreError> {
            self.inner.health_check().await
        }
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_set_get() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let key = "test_key";
        let value = "test_value";

        // Set and get
        cache.set(key, &value).await.unwrap();
        let result: String = cache.get(key).await.unwrap();
        assert_eq!(result, value);

        // Delete
        cache.delete(key).await.unwrap();
        assert!(cache.get::<String>(key).await.is_err());
    }

    #[tokio::test]
    async fn test_in_memory_set_get_delete() {
        let cache = CacheManager::in_memory(10, 60);

        cache.set("k", &vec![1, 2, 3]).await.unwrap();
        let value: Vec<i32> = cache.get("k").await.unwrap();
        assert_eq!(value, vec![1, 2, 3]);

        cache.delete("k").await.unwrap();
        assert!(matches!(
            cache.get::<Vec<i32>>("k").await,
            Err(CacheError::CacheMiss(_))
        ));
        assert!(!cache.stats().l2_enabled);
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::provider_snapshot(), "providers:all");
        assert_eq!(CacheKey::provider(42), "provider:42");
    }

    #[tokio::test]
    async fn test_snapshot_invalidated_on_create() {
        let cache = Arc::new(CacheManager::in_memory(10, 60));
        let store = CachedProviderStore::new(MemoryProviderStore::with_sample_data(), cache);

        assert_eq!(store.list_providers().await.unwrap().len(), 6);

        let created = store
            .create_provider(sample_providers().remove(4))
            .await
            .unwrap();
        assert_eq!(created.id, 7);

        assert_eq!(store.list_providers().await.unwrap().len(), 7);
        assert_eq!(store.inner().len().await, 7);
    }

    #[tokio::test]
    async fn test_get_provider_through_cache() {
        let cache = Arc::new(CacheManager::in_memory(10, 60));
        let store = CachedProviderStore::new(MemoryProviderStore::with_sample_data(), cache);

        let first = store.get_provider(5).await.unwrap();
        let second = store.get_provider(5).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.map(|p| p.name), Some("Coimbatore Law Group".to_string()));
        assert!(store.get_provider(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_read_during_create_is_not_kept() {
        let (read_done_tx, read_done_rx) = oneshot::channel();
        let (resume_tx, resume_rx) = oneshot::channel();
        let inner = PausingStore {
            inner: MemoryProviderStore::with_sample_data(),
            read_done: Mutex::new(Some(read_done_tx)),
            resume: Mutex::new(Some(resume_rx)),
        };
        let cache = Arc::new(CacheManager::in_memory(10, 60));
        let store = Arc::new(CachedProviderStore::new(inner, cache));

        let reader = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.list_providers().await })
        };

        // The reader holds the six-provider snapshot; create while it waits
        read_done_rx.await.unwrap();
        let created = store
            .create_provider(sample_providers().remove(2))
            .await
            .unwrap();
        assert_eq!(created.id, 7);
        resume_tx.send(()).unwrap();

        let stale = reader.await.unwrap().unwrap();
        assert_eq!(stale.len(), 6);

        assert_eq!(store.list_providers().await.unwrap().len(), 7);
    }
}
