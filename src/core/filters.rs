use crate::models::{Provider, ScoredCandidate, SearchQuery};
use crate::core::distance::haversine_distance;

/// Check whether any of the provider's service labels matches the category filter
///
/// Matching is case-insensitive and substring-inclusive, so `"family"`
/// matches `"Family Law"`.
#[inline]
pub fn matches_category(services: &[String], category: &str) -> bool {
    let needle = category.to_lowercase();
    services
        .iter()
        .any(|service| service.to_lowercase().contains(&needle))
}

/// Nearby filter
///
/// Pairs every provider within `radius_km` of the query point with its
/// distance, then applies the category filter when one is active.
/// Result order follows the input and carries no ranking.
pub fn find_nearby(
    providers: &[Provider],
    query: &SearchQuery,
    radius_km: f64,
) -> Vec<ScoredCandidate> {
    let category = query.category_filter();

    providers
        .iter()
        .filter_map(|provider| {
            let distance = haversine_distance(
                query.latitude,
                query.longitude,
                provider.latitude,
                provider.longitude,
            );

            if distance > radius_km {
                return None;
            }

            if let Some(category) = category {
                if !matches_category(&provider.services, category) {
                    return None;
                }
            }

            Some(ScoredCandidate {
                provider: provider.clone(),
                distance,
            })
        })
        .collect()
}
