// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod scoring;
pub mod searcher;

pub use distance::haversine_distance;
pub use filters::{find_nearby, matches_category};
pub use scoring::{calculate_provider_score, rank_candidates};
pub use searcher::ProviderSearcher;
