//! Provider Locator - location-based legal service provider search
//!
//! This library provides the search-and-ranking core used by the locator
//! service: haversine distance, a nearby filter with fuzzy category matching,
//! composite scoring, and a two-tier radius fallback search.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ProviderSearcher, distance::haversine_distance};
pub use models::{Provider, NewProvider, SearchQuery, SearchOutcome, ScoredCandidate, ScoringWeights, SearchRadii};
pub use services::{ProviderSource, ProviderStore, MemoryProviderStore, StoreError};
