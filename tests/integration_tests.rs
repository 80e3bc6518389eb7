// Integration tests for Provider Locator

use provider_locator::core::{ProviderSearcher, find_nearby, rank_candidates, distance::haversine_distance};
use provider_locator::models::{NewProvider, ScoringWeights, SearchQuery, SearchTier};
use provider_locator::services::{sample_providers, MemoryProviderStore, ProviderSource, ProviderStore};

const SALEM: (f64, f64) = (11.6528, 78.1585);
const COIMBATORE: (f64, f64) = (11.0162, 76.9626);

fn create_new_provider(name: &str, lat: f64, lon: f64, rating: Option<f64>, services: &[&str]) -> NewProvider {
    NewProvider {
        name: name.to_string(),
        services: services.iter().map(|s| s.to_string()).collect(),
        phone: "(0422) 111-2222".to_string(),
        email: "office@example.com".to_string(),
        website: None,
        address: "1 Avinashi Road".to_string(),
        city: "Coimbatore".to_string(),
        state: "Tamil Nadu".to_string(),
        postal_code: "641018".to_string(),
        latitude: lat,
        longitude: lon,
        description: "Test provider".to_string(),
        rating,
        review_count: 30,
        years_experience: Some(12),
    }
}

fn names(outcome: &provider_locator::SearchOutcome) -> Vec<String> {
    outcome
        .results
        .iter()
        .map(|c| c.provider.name.clone())
        .collect()
}

#[tokio::test]
async fn test_salem_query_uses_primary_radius() {
    let store = MemoryProviderStore::with_sample_data();
    let searcher = ProviderSearcher::with_defaults();

    let outcome = searcher
        .search_with_fallback(&store, &SearchQuery::new(SALEM.0, SALEM.1))
        .await
        .unwrap();

    assert_eq!(outcome.radius_used, 30);
    assert_eq!(outcome.tier, SearchTier::Primary);
    assert_eq!(
        names(&outcome),
        vec!["Capital Law Associates", "Kumar & Associates", "Jayakumar Legal Solutions"]
    );
    for candidate in &outcome.results {
        assert_eq!(candidate.provider.city, "Salem");
        assert!(candidate.distance < 5.0, "Salem provider at {}km", candidate.distance);
    }
}

#[tokio::test]
async fn test_origin_query_yields_empty_fallback() {
    let store = MemoryProviderStore::with_sample_data();
    let searcher = ProviderSearcher::with_defaults();

    let outcome = searcher
        .search_with_fallback(&store, &SearchQuery::new(0.0, 0.0))
        .await
        .unwrap();

    assert_eq!(outcome.radius_used, 60);
    assert_eq!(outcome.tier, SearchTier::Fallback);
    assert!(outcome.results.is_empty());
}

#[tokio::test]
async fn test_fallback_radius_reaches_salem() {
    let store = MemoryProviderStore::with_sample_data();
    let searcher = ProviderSearcher::with_defaults();

    // ~45km north of Salem
    let outcome = searcher
        .search_with_fallback(&store, &SearchQuery::new(12.06, 78.1585))
        .await
        .unwrap();

    assert_eq!(outcome.radius_used, 60);
    assert_eq!(outcome.results.len(), 3);
    for candidate in &outcome.results {
        assert!(candidate.distance > 30.0 && candidate.distance <= 60.0);
    }
}

#[tokio::test]
async fn test_tax_filter_near_coimbatore() {
    let mut providers = sample_providers();
    // Closer to the query point and better rated, but no tax practice
    providers.push(create_new_provider(
        "Coimbatore Family Counsel",
        11.0170,
        76.9600,
        Some(5.0),
        &["Family Law"],
    ));
    let store = MemoryProviderStore::with_providers(providers);
    let searcher = ProviderSearcher::with_defaults();

    let query = SearchQuery::new(11.0175, 76.9590).with_service_type("tax");
    let outcome = searcher.search_with_fallback(&store, &query).await.unwrap();

    assert_eq!(outcome.radius_used, 30);
    assert_eq!(outcome.results[0].provider.name, "Coimbatore Law Group");
    assert!(outcome
        .results
        .iter()
        .all(|c| c.provider.services.iter().any(|s| s.to_lowercase().contains("tax"))));
}

#[tokio::test]
async fn test_category_bonus_ranks_matching_provider_first() {
    let store = MemoryProviderStore::with_providers(vec![
        create_new_provider("Near Generalist", COIMBATORE.0, COIMBATORE.1, Some(4.7), &["Corporate Law"]),
        create_new_provider("Tax Specialist", 11.05, 76.9626, Some(4.7), &["Corporate Law", "Tax Law"]),
    ]);
    let candidates = find_nearby(
        &store.list_providers().await.unwrap(),
        &SearchQuery::new(COIMBATORE.0, COIMBATORE.1),
        30.0,
    );

    let ranked = rank_candidates(candidates, Some("tax"), &ScoringWeights::default());

    assert_eq!(ranked[0].provider.name, "Tax Specialist");
    assert!(ranked[0].distance > ranked[1].distance);
}

#[tokio::test]
async fn test_all_filter_behaves_as_no_filter() {
    let store = MemoryProviderStore::with_sample_data();
    let searcher = ProviderSearcher::with_defaults();

    let unfiltered = searcher
        .search_with_fallback(&store, &SearchQuery::new(SALEM.0, SALEM.1))
        .await
        .unwrap();

    for service_type in ["all", ""] {
        let query = SearchQuery::new(SALEM.0, SALEM.1).with_service_type(service_type);
        let filtered = searcher.search_with_fallback(&store, &query).await.unwrap();

        assert_eq!(filtered.radius_used, unfiltered.radius_used);
        assert_eq!(names(&filtered), names(&unfiltered));
    }
}

#[tokio::test]
async fn test_unmatched_category_falls_back_to_empty() {
    let store = MemoryProviderStore::with_sample_data();
    let searcher = ProviderSearcher::with_defaults();

    let query = SearchQuery::new(SALEM.0, SALEM.1).with_service_type("immigration");
    let outcome = searcher.search_with_fallback(&store, &query).await.unwrap();

    assert_eq!(outcome.radius_used, 60);
    assert!(outcome.results.is_empty());
}

#[tokio::test]
async fn test_never_more_than_three_results() {
    let mut providers = sample_providers();
    for i in 0..10 {
        providers.push(create_new_provider(
            &format!("Salem Firm {}", i),
            SALEM.0 + i as f64 * 0.002,
            SALEM.1,
            Some(3.5),
            &["Family Law"],
        ));
    }
    let store = MemoryProviderStore::with_providers(providers);
    let searcher = ProviderSearcher::with_defaults();

    for service_type in [None, Some("family"), Some("all")] {
        let mut query = SearchQuery::new(SALEM.0, SALEM.1);
        query.service_type = service_type.map(str::to_string);

        let outcome = searcher.search_with_fallback(&store, &query).await.unwrap();
        assert!(outcome.results.len() <= 3);
    }
}

#[tokio::test]
async fn test_nearby_filter_respects_radius() {
    let providers = MemoryProviderStore::with_sample_data()
        .list_providers()
        .await
        .unwrap();

    let query_points = [SALEM, COIMBATORE, (10.79, 78.70), (13.08, 80.27), (12.0, 78.0)];
    for (lat, lon) in query_points {
        for radius in [1.0, 30.0, 60.0, 200.0, 500.0] {
            let query = SearchQuery::new(lat, lon);
            for candidate in find_nearby(&providers, &query, radius) {
                let distance = haversine_distance(
                    lat,
                    lon,
                    candidate.provider.latitude,
                    candidate.provider.longitude,
                );
                assert!(distance <= radius);
                assert_eq!(distance, candidate.distance);
            }
        }
    }
}

#[tokio::test]
async fn test_ranking_is_deterministic() {
    let providers = MemoryProviderStore::with_sample_data()
        .list_providers()
        .await
        .unwrap();
    let query = SearchQuery::new(12.0, 78.0);
    let weights = ScoringWeights::default();

    let first = rank_candidates(find_nearby(&providers, &query, 500.0), None, &weights);
    let second = rank_candidates(find_nearby(&providers, &query, 500.0), None, &weights);

    let first_ids: Vec<i32> = first.iter().map(|c| c.provider.id).collect();
    let second_ids: Vec<i32> = second.iter().map(|c| c.provider.id).collect();
    assert_eq!(first_ids.len(), 6);
    assert_eq!(first_ids, second_ids);
}

#[tokio::test]
async fn test_created_provider_is_searchable() {
    let store = MemoryProviderStore::new();
    let searcher = ProviderSearcher::with_defaults();

    let created = store
        .create_provider(create_new_provider("Fresh Firm", 11.0, 77.0, Some(4.0), &["Tax Law"]))
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    let outcome = searcher
        .search_with_fallback(&store, &SearchQuery::new(11.0, 77.0).with_service_type("TAX"))
        .await
        .unwrap();

    assert_eq!(outcome.radius_used, 30);
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].provider.id, created.id);
}
