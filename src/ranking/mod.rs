//! The ranking engine: filter, score, compose, sort.
//!
//! - [`filter`]: predicate-based subset selection (fail-closed).
//! - [`score`]: the seven pure sub-scorers and [`ScoreBreakdown`].
//! - [`rank`]: composite scoring, tie-break ordering, rank assignment.
//! - [`weights`]: the immutable [`RankingWeights`] configuration.
//! - [`geo`]: Haversine distance.

pub mod filter;
pub mod geo;
pub mod rank;
pub mod score;
pub mod weights;

pub use filter::{filter_entities, matches_query};
pub use geo::haversine_km;
pub use rank::{RankedEntity, rank, search};
pub use score::{ScoreBreakdown, score_entity};
pub use weights::RankingWeights;
