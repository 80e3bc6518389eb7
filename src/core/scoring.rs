use crate::models::{ScoredCandidate, ScoringWeights};
use crate::core::filters::matches_category;

/// Calculate the composite ranking score for a candidate
///
/// Scoring formula (additive, higher is better):
/// score = (
///     (100 - distance_km) +            # Closer = higher, may go negative
///     rating * 10 +                    # Missing rating adds nothing
///     min(review_count, 100) / 5 +     # Capped at 20 points
///     years_experience * 2 +           # Missing experience adds nothing
///     30 if category filter matched    # Only when a filter is active
/// )
pub fn calculate_provider_score(
    candidate: &ScoredCandidate,
    category: Option<&str>,
    weights: &ScoringWeights,
) -> f64 {
    let provider = &candidate.provider;

    let proximity_score = weights.proximity_base - candidate.distance;

    let rating_score = provider
        .rating
        .map(|rating| rating * weights.rating)
        .unwrap_or(0.0);

    let review_score = calculate_review_score(provider.review_count, weights);

    let experience_score = provider
        .years_experience
        .map(|years| years as f64 * weights.experience)
        .unwrap_or(0.0);

    let category_score = match category {
        Some(category) if matches_category(&provider.services, category) => weights.category_bonus,
        _ => 0.0,
    };

    proximity_score + rating_score + review_score + experience_score + category_score
}

/// Review volume score, capped so large review counts stop paying off
#[inline]
fn calculate_review_score(review_count: i32, weights: &ScoringWeights) -> f64 {
    if review_count <= 0 {
        return 0.0;
    }

    review_count.min(weights.review_cap) as f64 / weights.review_divisor
}

/// Rank candidates by composite score, best first
///
/// Uses a stable sort, so candidates with identical scores keep their
/// input order. A candidate whose score is NaN ranks last.
pub fn rank_candidates(
    candidates: Vec<ScoredCandidate>,
    category: Option<&str>,
    weights: &ScoringWeights,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<(f64, ScoredCandidate)> = candidates
        .into_iter()
        .map(|candidate| {
            let score = calculate_provider_score(&candidate, category, weights);
            let score = if score.is_nan() { f64::NEG_INFINITY } else { score };
            (score, candidate)
        })
        .collect();

    scored.sort_by(|(score_a, _), (score_b, _)| score_b.total_cmp(score_a));

    scored.into_iter().map(|(_, candidate)| candidate).collect()
}
