use async_trait::async_trait;
use thiserror::Error;
use crate::models::{NewProvider, Provider, ProviderId};

/// Errors that can occur when reading or writing providers
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Provider store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Read-only access to the current provider snapshot
///
/// This is the only capability the search engine needs.
#[async_trait]
pub trait ProviderSource: Send + Sync {
    /// Fetch every current provider
    async fn list_providers(&self) -> Result<Vec<Provider>, StoreError>;
}

/// Full provider storage backend
#[async_trait]
pub trait ProviderStore: ProviderSource {
    async fn get_provider(&self, id: ProviderId) -> Result<Option<Provider>, StoreError>;

    /// Insert a provider and return it with its assigned id
    async fn create_provider(&self, provider: NewProvider) -> Result<Provider, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
