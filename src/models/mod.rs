// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    NewProvider, Provider, ProviderId, ScoredCandidate, ScoringWeights, SearchOutcome,
    SearchQuery, SearchRadii, SearchTier, ServiceType, SERVICE_TYPES,
};
pub use requests::{CreateProviderRequest, SearchRequest};
pub use responses::{ErrorResponse, HealthResponse, SearchResponse};
