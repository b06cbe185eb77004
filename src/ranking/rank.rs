//! Rank composition and the search entry point.
//!
//! Scoring is independent per entity, so large batches fan out through
//! rayon; the sort that follows is always a single sequential step, so
//! scoring order is never observable in the output.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{SearchQuery, SearchableEntity, SortBy};

use super::filter::filter_entities;
use super::score::{ScoreBreakdown, score_entity};
use super::weights::RankingWeights;

/// Batch size at which scoring moves onto the rayon pool.
const PARALLEL_SCORING_THRESHOLD: usize = 256;

/// One ranked result: the original entity paired with its score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub entity: SearchableEntity,
    pub breakdown: ScoreBreakdown,
    /// Composite score, rounded to the nearest integer. Primary sort key.
    pub relevance_score: i64,
    /// 1-based position after sorting.
    pub search_rank: usize,
}

impl RankedEntity {
    /// Distance to the user in km, when it was computable.
    pub fn distance_km(&self) -> Option<f64> {
        self.breakdown.distance_km
    }
}

/// Score, sort, and rank an already-filtered set of entities.
///
/// The base score is the sum of the seven sub-scores; the requested sort
/// mode adds a bonus share of its component. Ties break by rating then
/// review count, both descending; remaining ties keep input order.
pub fn rank(
    entities: Vec<SearchableEntity>,
    query: &SearchQuery,
    weights: &RankingWeights,
    now: DateTime<Utc>,
) -> Vec<RankedEntity> {
    let score_one = |entity: SearchableEntity| {
        let breakdown = score_entity(&entity, query, weights, now);
        let composite = composite_score(&breakdown, query.sort_by);
        RankedEntity {
            entity,
            relevance_score: composite.round() as i64,
            breakdown,
            search_rank: 0,
        }
    };

    let mut ranked: Vec<RankedEntity> = if entities.len() >= PARALLEL_SCORING_THRESHOLD {
        entities.into_par_iter().map(score_one).collect()
    } else {
        entities.into_iter().map(score_one).collect()
    };

    // Stable sort: full-key ties keep input order, so output is deterministic.
    ranked.sort_by(|a, b| {
        b.relevance_score
            .cmp(&a.relevance_score)
            .then_with(|| {
                let ra = a.entity.rating.unwrap_or(0.0);
                let rb = b.entity.rating.unwrap_or(0.0);
                rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| b.entity.review_count.cmp(&a.entity.review_count))
    });

    for (index, item) in ranked.iter_mut().enumerate() {
        item.search_rank = index + 1;
    }

    ranked
}

/// Filter then rank: the single entry point callers use.
pub fn search(
    entities: &[SearchableEntity],
    query: &SearchQuery,
    weights: &RankingWeights,
    now: DateTime<Utc>,
) -> Vec<RankedEntity> {
    let filtered = filter_entities(entities, query);
    debug!(
        total = entities.len(),
        kept = filtered.len(),
        sort_by = %query.sort_by,
        "filtered entities"
    );
    rank(filtered, query, weights, now)
}

fn composite_score(breakdown: &ScoreBreakdown, sort_by: SortBy) -> f64 {
    let bonus = match sort_by {
        SortBy::Relevance => 0.3 * breakdown.text_relevance,
        SortBy::Rating => 0.5 * breakdown.quality,
        SortBy::Distance => 1.0 * breakdown.distance,
        SortBy::Popularity => 0.5 * breakdown.popularity,
        SortBy::Newest => 1.0 * breakdown.recency,
        SortBy::Price => 0.0,
    };
    breakdown.base_total() + bonus
}
