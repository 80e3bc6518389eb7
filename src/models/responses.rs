use serde::{Deserialize, Serialize};
use crate::models::domain::{ScoredCandidate, SearchOutcome};

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub providers: Vec<ScoredCandidate>,
    pub radius: u16,
    pub count: usize,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        let count = outcome.results.len();
        Self {
            providers: outcome.results,
            radius: outcome.radius_used,
            count,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
