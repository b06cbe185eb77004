//! Post-hoc aggregate statistics over a ranked result set.
//!
//! Read-only over the ranked list. All averages are safe against empty
//! inputs and produce 0.0 rather than NaN.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::SearchQuery;
use crate::ranking::RankedEntity;

/// Rating at or above which a result counts as highly rated.
const HIGH_RATING: f64 = 4.0;

/// Quality breakdown of a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityBreakdown {
    pub verified_count: usize,
    pub with_rating_count: usize,
    pub high_rated_count: usize,
}

/// Aggregate statistics for one search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchAnalytics {
    /// Echo of the query text ("" for browse mode).
    pub query: String,
    pub total_results: usize,
    pub avg_relevance_score: f64,
    /// Category name to result count.
    pub top_categories: BTreeMap<String, usize>,
    pub quality: QualityBreakdown,
    /// City name to result count.
    pub cities: BTreeMap<String, usize>,
    pub captured_at: DateTime<Utc>,
}

/// Summarize a ranked result set.
pub fn generate_analytics(
    results: &[RankedEntity],
    query: &SearchQuery,
    now: DateTime<Utc>,
) -> SearchAnalytics {
    let total = results.len();
    let avg_relevance_score = if total == 0 {
        0.0
    } else {
        results.iter().map(|r| r.relevance_score as f64).sum::<f64>() / total as f64
    };

    let mut top_categories: BTreeMap<String, usize> = BTreeMap::new();
    let mut cities: BTreeMap<String, usize> = BTreeMap::new();
    let mut quality = QualityBreakdown::default();

    for result in results {
        if let Some(category) = &result.entity.category {
            *top_categories.entry(category.clone()).or_default() += 1;
        }
        if let Some(city) = &result.entity.city {
            *cities.entry(city.clone()).or_default() += 1;
        }
        if result.entity.verified {
            quality.verified_count += 1;
        }
        if let Some(rating) = result.entity.rating {
            if rating > 0.0 {
                quality.with_rating_count += 1;
            }
            if rating >= HIGH_RATING {
                quality.high_rated_count += 1;
            }
        }
    }

    SearchAnalytics {
        query: query.query.clone().unwrap_or_default(),
        total_results: total,
        avg_relevance_score,
        top_categories,
        quality,
        cities,
        captured_at: now,
    }
}
