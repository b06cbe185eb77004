//! Pure sub-scorers.
//!
//! Each scorer maps (entity, query context, weights) to a non-negative
//! number. A missing optional input contributes zero, never an error; the
//! scorers themselves cannot fail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{GeoPoint, SearchQuery, SearchableEntity, UserPreferences};

use super::geo::haversine_km;
use super::weights::RankingWeights;

/// Log-scale multiplier for review counts.
const REVIEW_LOG_SCALE: f64 = 20.0;
/// Log-scale multiplier for view counts.
const VIEW_LOG_SCALE: f64 = 10.0;
/// Log-scale multiplier for booking counts.
const BOOKING_LOG_SCALE: f64 = 15.0;
/// Response time at which the responsiveness contribution reaches zero.
const MAX_RESPONSE_MINUTES: f64 = 24.0 * 60.0;
/// Recently-updated window, in days.
const UPDATE_WINDOW_DAYS: f64 = 30.0;
/// Recently-active window, in days.
const ACTIVE_WINDOW_DAYS: f64 = 7.0;
/// Distance tier boundaries, in kilometers.
const NEAR_KM: f64 = 1.0;
const MODERATE_KM: f64 = 5.0;
const FAR_KM: f64 = 20.0;

/// Component scores for one entity against one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub text_relevance: f64,
    pub quality: f64,
    pub popularity: f64,
    pub business: f64,
    pub recency: f64,
    pub distance: f64,
    pub preference: f64,
    /// Query terms that matched, in query order.
    pub matched_terms: Vec<String>,
    /// Haversine distance to the user, when both locations were known.
    pub distance_km: Option<f64>,
}

impl ScoreBreakdown {
    /// Sum of all seven component scores, before the sort-mode bonus.
    pub fn base_total(&self) -> f64 {
        self.text_relevance
            + self.quality
            + self.popularity
            + self.business
            + self.recency
            + self.distance
            + self.preference
    }
}

/// Run all seven sub-scorers for one entity.
pub fn score_entity(
    entity: &SearchableEntity,
    query: &SearchQuery,
    weights: &RankingWeights,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    let (text_relevance, matched_terms) =
        text_relevance_score(entity, query.query.as_deref(), weights);
    let (distance, distance_km) = distance_score(entity, query.user_location, weights);

    ScoreBreakdown {
        text_relevance,
        quality: quality_score(entity, weights),
        popularity: popularity_score(entity, weights),
        business: business_score(entity, weights),
        recency: recency_score(entity, now, weights),
        distance,
        preference: preference_score(entity, query.preferences.as_ref(), weights),
        matched_terms,
        distance_km,
    }
}

/// Text relevance against the query text.
///
/// The query is lowercased and whitespace-split; each term is awarded the
/// first matching tier only (exact name, name, category, description, tag),
/// then the tier sum is damped toward half credit by the match ratio.
pub fn text_relevance_score(
    entity: &SearchableEntity,
    query_text: Option<&str>,
    weights: &RankingWeights,
) -> (f64, Vec<String>) {
    let Some(raw) = query_text else {
        return (0.0, Vec::new());
    };
    if raw.trim().is_empty() {
        return (0.0, Vec::new());
    }

    let terms: Vec<String> = raw
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect();

    let name = entity.name.to_lowercase();
    let category = entity.category.as_deref().unwrap_or("").to_lowercase();
    let description = entity.description.as_deref().unwrap_or("").to_lowercase();
    let tags: Vec<String> = entity.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut score = 0.0;
    let mut matched_terms = Vec::new();

    for term in &terms {
        let tier = if name == *term {
            Some(weights.exact_match)
        } else if name.contains(term.as_str()) {
            Some(weights.name_match)
        } else if category.contains(term.as_str()) {
            Some(weights.category_match)
        } else if description.contains(term.as_str()) {
            Some(weights.description_match)
        } else if tags.iter().any(|tag| tag.contains(term.as_str())) {
            Some(weights.tag_match)
        } else {
            None
        };

        if let Some(points) = tier {
            score += points;
            matched_terms.push(term.clone());
        }
    }

    let match_ratio = matched_terms.len() as f64 / terms.len() as f64;
    (score * (0.5 + 0.5 * match_ratio), matched_terms)
}

/// Ratings, review volume, verification, and profile completeness.
pub fn quality_score(entity: &SearchableEntity, weights: &RankingWeights) -> f64 {
    let mut score = 0.0;

    if let Some(rating) = entity.rating {
        score += (rating / 5.0) * weights.rating;
    }

    score += (log10_plus_one(entity.review_count) * REVIEW_LOG_SCALE).min(weights.review_count_cap);

    if entity.verified {
        score += weights.verified;
    }

    if let Some(completeness) = entity.completeness_score {
        score += completeness * weights.completeness;
    }

    score
}

/// Editorial flags plus log-scaled engagement counts.
pub fn popularity_score(entity: &SearchableEntity, weights: &RankingWeights) -> f64 {
    let mut score = 0.0;

    if entity.is_recommended {
        score += weights.is_recommended;
    }
    if entity.is_popular {
        score += weights.is_popular;
    }
    if entity.is_trending {
        score += weights.is_trending;
    }

    score += (log10_plus_one(entity.view_count) * VIEW_LOG_SCALE).min(weights.view_count_cap);
    score +=
        (log10_plus_one(entity.booking_count) * BOOKING_LOG_SCALE).min(weights.booking_count_cap);

    score
}

/// Responsiveness signals: response rate, response time, currently open.
pub fn business_score(entity: &SearchableEntity, weights: &RankingWeights) -> f64 {
    let mut score = 0.0;

    if let Some(rate) = entity.response_rate {
        score += (rate / 100.0) * weights.response_rate;
    }

    if let Some(minutes) = entity.response_time_minutes {
        score += (1.0 - minutes / MAX_RESPONSE_MINUTES).max(0.0) * weights.response_time;
    }

    if entity.is_open {
        score += weights.is_open;
    }

    score
}

/// Linear decay over the recently-updated and recently-active windows.
pub fn recency_score(
    entity: &SearchableEntity,
    now: DateTime<Utc>,
    weights: &RankingWeights,
) -> f64 {
    let mut score = 0.0;

    if let Some(updated_at) = entity.updated_at {
        let days = days_between(updated_at, now);
        if days <= UPDATE_WINDOW_DAYS {
            score += (1.0 - days / UPDATE_WINDOW_DAYS).max(0.0) * weights.recently_updated;
        }
    }

    if let Some(active_at) = entity.last_active_at {
        let days = days_between(active_at, now);
        if days <= ACTIVE_WINDOW_DAYS {
            score += (1.0 - days / ACTIVE_WINDOW_DAYS).max(0.0) * weights.recently_active;
        }
    }

    score
}

/// Tiered proximity score; also reports the computed distance.
///
/// Requires both a user location and entity coordinates, else (0, None).
pub fn distance_score(
    entity: &SearchableEntity,
    user_location: Option<GeoPoint>,
    weights: &RankingWeights,
) -> (f64, Option<f64>) {
    let (Some(user), Some(point)) = (user_location, entity.coordinates) else {
        return (0.0, None);
    };

    let km = haversine_km(user, point);
    let score = if km <= NEAR_KM {
        weights.distance_near
    } else if km <= MODERATE_KM {
        weights.distance_moderate
    } else if km <= FAR_KM {
        weights.distance_far
    } else {
        0.0
    };
    (score, Some(km))
}

/// Bonuses for preferred categories and previously searched names.
pub fn preference_score(
    entity: &SearchableEntity,
    preferences: Option<&UserPreferences>,
    weights: &RankingWeights,
) -> f64 {
    let Some(prefs) = preferences else {
        return 0.0;
    };

    let mut score = 0.0;

    if let Some(category) = &entity.category {
        if prefs.preferred_categories.iter().any(|c| c == category) {
            score += weights.preferred_category;
        }
    }

    let name = entity.name.to_lowercase();
    let searched_similar = prefs.previous_searches.iter().any(|search| {
        let search = search.to_lowercase();
        name.contains(&search) || search.contains(&name)
    });
    if searched_similar {
        score += weights.previous_search;
    }

    score
}

fn log10_plus_one(count: u64) -> f64 {
    ((count + 1) as f64).log10()
}

fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_seconds() as f64 / 86_400.0
}
