use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use crate::models::{NewProvider, Provider, ProviderId};
use crate::services::seed::sample_providers;
use crate::services::store::{ProviderSource, ProviderStore, StoreError};

struct Inner {
    providers: BTreeMap<ProviderId, Provider>,
    next_id: ProviderId,
}

/// In-memory provider store
///
/// Ids are assigned sequentially from 1. Listing returns providers in id
/// order, so searches over the same data are reproducible.
pub struct MemoryProviderStore {
    inner: RwLock<Inner>,
}

impl MemoryProviderStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                providers: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store holding the given providers, ids assigned in order
    pub fn with_providers(providers: Vec<NewProvider>) -> Self {
        let mut map = BTreeMap::new();
        let mut next_id = 1;
        for provider in providers {
            map.insert(next_id, provider.into_provider(next_id));
            next_id += 1;
        }

        Self {
            inner: RwLock::new(Inner {
                providers: map,
                next_id,
            }),
        }
    }

    /// Create a store seeded with the sample providers
    pub fn with_sample_data() -> Self {
        Self::with_providers(sample_providers())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.providers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryProviderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderSource for MemoryProviderStore {
    async fn list_providers(&self) -> Result<Vec<Provider>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.providers.values().cloned().collect())
    }
}

#[async_trait]
impl ProviderStore for MemoryProviderStore {
    async fn get_provider(&self, id: ProviderId) -> Result<Option<Provider>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.providers.get(&id).cloned())
    }

    async fn create_provider(&self, provider: NewProvider) -> Result<Provider, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::InvalidInput("provider id space exhausted".to_string()))?;

        let provider = provider.into_provider(id);
        inner.providers.insert(id, provider.clone());

        tracing::debug!("Created provider {} ({})", provider.id, provider.name);

        Ok(provider)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
