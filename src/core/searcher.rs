use crate::models::{Provider, ScoredCandidate, ScoringWeights, SearchOutcome, SearchQuery, SearchRadii, SearchTier};
use crate::core::{filters::find_nearby, scoring::rank_candidates};
use crate::services::store::{ProviderSource, StoreError};

/// Search orchestrator - implements the two-tier radius fallback
///
/// # Tiers
/// 1. Nearby filter + ranking at the primary radius
/// 2. Only if tier 1 is empty: nearby filter + ranking at the fallback
///    radius over the full provider set
///
/// The winning tier's ranked list is truncated to `max_results`.
#[derive(Debug, Clone)]
pub struct ProviderSearcher {
    weights: ScoringWeights,
    radii: SearchRadii,
}

impl ProviderSearcher {
    pub fn new(weights: ScoringWeights, radii: SearchRadii) -> Self {
        Self { weights, radii }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: ScoringWeights::default(),
            radii: SearchRadii::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn radii(&self) -> &SearchRadii {
        &self.radii
    }

    /// Fetch a provider snapshot and search it
    ///
    /// The snapshot is fetched once per call; both tiers run against it.
    /// Store failures are returned as-is and never retried here.
    pub async fn search_with_fallback<S>(
        &self,
        source: &S,
        query: &SearchQuery,
    ) -> Result<SearchOutcome, StoreError>
    where
        S: ProviderSource + ?Sized,
    {
        let providers = source.list_providers().await?;

        tracing::debug!(
            "Searching {} providers around ({}, {})",
            providers.len(),
            query.latitude,
            query.longitude
        );

        Ok(self.search_snapshot(&providers, query))
    }

    /// Run the fallback search over an in-memory snapshot
    pub fn search_snapshot(&self, providers: &[Provider], query: &SearchQuery) -> SearchOutcome {
        let primary = self.search_tier(providers, query, self.radii.primary_km);

        let (mut results, radius_used, tier) = if !primary.is_empty() {
            (primary, self.radii.primary_km, SearchTier::Primary)
        } else {
            tracing::debug!(
                "No providers within {}km, retrying at {}km",
                self.radii.primary_km,
                self.radii.fallback_km
            );
            let fallback = self.search_tier(providers, query, self.radii.fallback_km);
            (fallback, self.radii.fallback_km, SearchTier::Fallback)
        };

        results.truncate(self.radii.max_results);

        SearchOutcome {
            results,
            radius_used,
            tier,
        }
    }

    /// One tier: filter at `radius_km`, then rank
    fn search_tier(
        &self,
        providers: &[Provider],
        query: &SearchQuery,
        radius_km: u16,
    ) -> Vec<ScoredCandidate> {
        let nearby = find_nearby(providers, query, radius_km as f64);
        rank_candidates(nearby, query.category_filter(), &self.weights)
    }
}

impl Default for ProviderSearcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
