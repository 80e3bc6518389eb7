// Service exports
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod seed;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats, CachedProviderStore};
pub use memory::MemoryProviderStore;
pub use postgres::PostgresProviderStore;
pub use seed::sample_providers;
pub use store::{ProviderSource, ProviderStore, StoreError};
