//! Per-scenario metric computation.
//!
//! Relevance quality and user satisfaction are heuristics over the ranked
//! output; both are zero-safe on empty result sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{SearchQuery, SortBy};
use crate::ranking::RankedEntity;

use super::scenario::TestScenario;

/// Measured metrics for one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub execution_time_ms: f64,
    pub estimated_memory_bytes: u64,
    pub results_count: usize,
    /// Relevance quality in [0, 100].
    pub relevance_quality: f64,
    /// Synthesized satisfaction estimate in [0, 100].
    pub user_satisfaction: f64,
    pub api_response_time_ms: f64,
    pub error_rate_percent: f64,
    pub timestamp: DateTime<Utc>,
}

/// Weighted average over the applicable quality checks.
///
/// Up to four ratio checks are included, one per query field that was set
/// (query-term match, verified, has_reviews, min_rating), plus a sort-order
/// check that always participates: 100 when the output is non-increasing by
/// the sort key, 50 otherwise. Zero results score 0.
pub fn relevance_quality(results: &[RankedEntity], query: &SearchQuery) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total = results.len() as f64;

    let mut score = 0.0;
    let mut checks = 0usize;

    if let Some(text) = query.query.as_deref() {
        if !text.trim().is_empty() {
            let terms: Vec<String> = text
                .to_lowercase()
                .split_whitespace()
                .map(str::to_owned)
                .collect();
            let relevant = results
                .iter()
                .filter(|r| {
                    let name = r.entity.name.to_lowercase();
                    let description = r.entity.description.as_deref().unwrap_or("").to_lowercase();
                    let category = r.entity.category.as_deref().unwrap_or("").to_lowercase();
                    terms.iter().any(|term| {
                        name.contains(term.as_str())
                            || description.contains(term.as_str())
                            || category.contains(term.as_str())
                    })
                })
                .count();
            score += relevant as f64 / total * 100.0;
            checks += 1;
        }
    }

    if query.filters.verified {
        let verified = results.iter().filter(|r| r.entity.verified).count();
        score += verified as f64 / total * 100.0;
        checks += 1;
    }

    if query.filters.has_reviews {
        let reviewed = results.iter().filter(|r| r.entity.review_count > 0).count();
        score += reviewed as f64 / total * 100.0;
        checks += 1;
    }

    if let Some(min_rating) = query.filters.min_rating {
        let rated = results
            .iter()
            .filter(|r| r.entity.rating.is_some_and(|rating| rating >= min_rating))
            .count();
        score += rated as f64 / total * 100.0;
        checks += 1;
    }

    score += sort_order_score(results, query.sort_by);
    checks += 1;

    score / checks as f64
}

/// 100 when adjacent pairs are non-increasing by the sort key, else 50.
fn sort_order_score(results: &[RankedEntity], sort_by: SortBy) -> f64 {
    let sorted = match sort_by {
        SortBy::Rating => results.windows(2).all(|pair| {
            pair[0].entity.rating.unwrap_or(0.0) >= pair[1].entity.rating.unwrap_or(0.0)
        }),
        _ => results
            .windows(2)
            .all(|pair| pair[0].relevance_score >= pair[1].relevance_score),
    };
    if sorted { 100.0 } else { 50.0 }
}

/// Satisfaction estimate for one scenario's result set.
///
/// 30 points for meeting the expected result count, up to 25 for average
/// rating, up to 25 for average relevance score, up to 20 for the verified
/// share; capped at 100.
pub fn user_satisfaction(results: &[RankedEntity], scenario: &TestScenario) -> f64 {
    let mut satisfaction = 0.0;

    if results.len() >= scenario.expected_min_results {
        satisfaction += 30.0;
    }

    if !results.is_empty() {
        let total = results.len() as f64;
        let avg_rating =
            results.iter().map(|r| r.entity.rating.unwrap_or(0.0)).sum::<f64>() / total;
        satisfaction += (avg_rating / 5.0) * 25.0;

        let avg_relevance =
            results.iter().map(|r| r.relevance_score as f64).sum::<f64>() / total;
        satisfaction += (avg_relevance / 10.0).min(25.0);

        let verified_ratio = results.iter().filter(|r| r.entity.verified).count() as f64 / total;
        satisfaction += verified_ratio * 20.0;
    }

    satisfaction.min(100.0)
}

/// Rough in-memory footprint: serialized JSON size times two.
pub fn estimate_memory_bytes<T: Serialize>(value: &T) -> u64 {
    serde_json::to_vec(value).map(|v| v.len() as u64 * 2).unwrap_or(0)
}
