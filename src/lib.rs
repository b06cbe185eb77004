//! Deterministic multi-factor search ranking for local business listings.
//!
//! The engine takes an in-memory collection of [`SearchableEntity`] values
//! and a [`SearchQuery`], filters by the query's active predicates, scores
//! each survivor with seven independent sub-scorers, and produces a
//! strictly ordered, diagnosable result list. A performance harness
//! ([`harness`]) exercises the pipeline against fixed scenarios and renders
//! a prioritized optimization report.
//!
//! ```
//! use listing_search::{
//!     EntityKind, RankingWeights, SearchQuery, SearchableEntity, search,
//! };
//! use chrono::Utc;
//!
//! let mut cafe = SearchableEntity::new("cafe-1", "Best Coffee Shop", EntityKind::Shop);
//! cafe.rating = Some(4.5);
//!
//! let results = search(
//!     &[cafe],
//!     &SearchQuery::text("coffee shop"),
//!     &RankingWeights::default(),
//!     Utc::now(),
//! );
//! assert_eq!(results[0].search_rank, 1);
//! ```

pub mod analytics;
pub mod clock;
pub mod harness;
pub mod model;
pub mod ranking;

pub use analytics::{QualityBreakdown, SearchAnalytics, generate_analytics};
pub use clock::{Clock, FixedClock, SystemClock};
pub use model::{
    EntityKind, GeoPoint, LocationFilter, PriceRange, QueryFilters, SearchQuery, SearchableEntity,
    SortBy, TypeFilter, UserPreferences,
};
pub use ranking::{
    RankedEntity, RankingWeights, ScoreBreakdown, filter_entities, haversine_km, rank, search,
};
