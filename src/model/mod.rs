//! Entity and query model.

pub mod types;

pub use types::{
    EntityKind, GeoPoint, LocationFilter, PriceRange, QueryFilters, SearchQuery, SearchableEntity,
    SortBy, TypeFilter, UserPreferences,
};
