//! Ranking weight configuration.
//!
//! All scorer constants live here as one immutable struct passed into every
//! scorer call. Callers that want non-default weighting build their own
//! instance; nothing in the crate mutates process-wide state.

use serde::{Deserialize, Serialize};

/// Weights for the ranking factors.
///
/// Text tiers are awarded per query term, first matching tier only. The
/// `*_cap` fields bound the log-scaled engagement contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    // Text relevance tiers.
    pub exact_match: f64,
    pub name_match: f64,
    pub category_match: f64,
    pub description_match: f64,
    pub tag_match: f64,

    // Quality factors.
    pub rating: f64,
    pub review_count_cap: f64,
    pub verified: f64,
    pub completeness: f64,

    // Popularity factors.
    pub is_recommended: f64,
    pub is_popular: f64,
    pub is_trending: f64,
    pub view_count_cap: f64,
    pub booking_count_cap: f64,

    // Business factors.
    pub response_rate: f64,
    pub response_time: f64,
    pub is_open: f64,

    // Recency.
    pub recently_updated: f64,
    pub recently_active: f64,

    // Location proximity tiers.
    pub distance_near: f64,
    pub distance_moderate: f64,
    pub distance_far: f64,

    // Preference bonuses.
    pub preferred_category: f64,
    pub previous_search: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            exact_match: 100.0,
            name_match: 80.0,
            category_match: 60.0,
            description_match: 40.0,
            tag_match: 30.0,

            rating: 70.0,
            review_count_cap: 50.0,
            verified: 60.0,
            completeness: 40.0,

            is_recommended: 80.0,
            is_popular: 60.0,
            is_trending: 50.0,
            view_count_cap: 30.0,
            booking_count_cap: 40.0,

            response_rate: 50.0,
            response_time: 30.0,
            is_open: 40.0,

            recently_updated: 20.0,
            recently_active: 30.0,

            distance_near: 60.0,
            distance_moderate: 30.0,
            distance_far: 10.0,

            preferred_category: 30.0,
            previous_search: 20.0,
        }
    }
}
