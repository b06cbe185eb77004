//! Value types for searchable listings and structured queries.
//!
//! Every optional attribute is an explicit `Option` with a documented
//! zero-default at scoring time; scorers never see an "undefined" field.
//! Derived outputs (relevance score, distance, matched terms, rank) live on
//! [`crate::ranking::RankedEntity`], not here: filtering and scoring read
//! only caller-supplied fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Listing kinds searchable by the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Service,
    Shop,
    User,
    Product,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service => write!(f, "service"),
            Self::Shop => write!(f, "shop"),
            Self::User => write!(f, "user"),
            Self::Product => write!(f, "product"),
        }
    }
}

/// Type constraint on a query. `All` imposes no constraint.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Service,
    Shop,
    User,
    Product,
}

impl TypeFilter {
    /// Whether `kind` satisfies this filter.
    pub fn matches(self, kind: EntityKind) -> bool {
        match self {
            Self::All => true,
            Self::Service => kind == EntityKind::Service,
            Self::Shop => kind == EntityKind::Shop,
            Self::User => kind == EntityKind::User,
            Self::Product => kind == EntityKind::Product,
        }
    }
}

/// Sort mode, selecting which component score gets a composite bonus.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Relevance,
    Rating,
    Distance,
    Popularity,
    Newest,
    Price,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Relevance => write!(f, "relevance"),
            Self::Rating => write!(f, "rating"),
            Self::Distance => write!(f, "distance"),
            Self::Popularity => write!(f, "popularity"),
            Self::Newest => write!(f, "newest"),
            Self::Price => write!(f, "price"),
        }
    }
}

/// A latitude/longitude pair in degrees. Present as a pair or absent.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One searchable listing: a service, shop, user, or product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchableEntity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,

    // Descriptive text.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,

    // Quality signals.
    /// Average rating in [0, 5], absent when unrated.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub verified: bool,
    /// Profile completeness in [0, 1].
    #[serde(default)]
    pub completeness_score: Option<f64>,

    // Popularity signals.
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub is_recommended: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub booking_count: u64,

    // Location.
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub area: Option<String>,

    // Business responsiveness.
    /// Response rate in [0, 100].
    #[serde(default)]
    pub response_rate: Option<f64>,
    #[serde(default)]
    pub response_time_minutes: Option<f64>,
    #[serde(default)]
    pub is_open: bool,

    // Temporal signals.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_active_at: Option<DateTime<Utc>>,

    // Commerce.
    #[serde(default)]
    pub price: Option<f64>,
}

impl SearchableEntity {
    /// Minimal entity with the given identity; every optional signal absent.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: None,
            category: None,
            subcategory: None,
            tags: Vec::new(),
            rating: None,
            review_count: 0,
            verified: false,
            completeness_score: None,
            is_popular: false,
            is_trending: false,
            is_recommended: false,
            view_count: 0,
            booking_count: 0,
            coordinates: None,
            city: None,
            area: None,
            response_rate: None,
            response_time_minutes: None,
            is_open: false,
            created_at: None,
            updated_at: None,
            last_active_at: None,
            price: None,
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Location constraints on a query. City and area are carried as data for
/// callers; only `radius_km` (with a user location) filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationFilter {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub radius_km: Option<f64>,
}

/// Quality filters. Boolean flags impose a constraint only when `true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryFilters {
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub has_reviews: bool,
    #[serde(default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub open_now: bool,
}

/// Lightweight personalization signals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub preferred_categories: Vec<String>,
    #[serde(default)]
    pub previous_searches: Vec<String>,
}

/// A structured search request. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub kind: TypeFilter,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<LocationFilter>,
    #[serde(default)]
    pub filters: QueryFilters,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub user_location: Option<GeoPoint>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

impl SearchQuery {
    /// A query matching everything, sorted by relevance (browse mode).
    pub fn browse() -> Self {
        Self::default()
    }

    /// Text query with default filters.
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_display() {
        assert_eq!(EntityKind::Service.to_string(), "service");
        assert_eq!(EntityKind::Shop.to_string(), "shop");
        assert_eq!(EntityKind::User.to_string(), "user");
        assert_eq!(EntityKind::Product.to_string(), "product");
    }

    #[test]
    fn type_filter_all_matches_everything() {
        for kind in [
            EntityKind::Service,
            EntityKind::Shop,
            EntityKind::User,
            EntityKind::Product,
        ] {
            assert!(TypeFilter::All.matches(kind));
        }
    }

    #[test]
    fn type_filter_specific() {
        assert!(TypeFilter::Shop.matches(EntityKind::Shop));
        assert!(!TypeFilter::Shop.matches(EntityKind::Service));
    }

    #[test]
    fn sort_by_default_is_relevance() {
        assert_eq!(SortBy::default(), SortBy::Relevance);
    }

    #[test]
    fn price_range_inclusive_bounds() {
        let range = PriceRange {
            min: 50.0,
            max: 500.0,
        };
        assert!(range.contains(50.0));
        assert!(range.contains(500.0));
        assert!(!range.contains(49.99));
        assert!(!range.contains(500.01));
    }

    #[test]
    fn entity_serde_roundtrip() {
        let mut entity =
            SearchableEntity::new("svc-1", "Cairo Dental Clinic", EntityKind::Service);
        entity.category = Some("dentist".to_string());
        entity.tags = vec!["teeth".to_string(), "clinic".to_string()];
        entity.rating = Some(4.5);
        entity.review_count = 120;
        entity.verified = true;
        entity.coordinates = Some(GeoPoint::new(30.0444, 31.2357));
        entity.price = Some(250.0);

        let json = serde_json::to_string(&entity).unwrap();
        let decoded: SearchableEntity = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, entity);
    }

    #[test]
    fn sparse_entity_json_uses_defaults() {
        let json = r#"{"id": "p-1", "name": "Espresso Beans", "kind": "product"}"#;
        let decoded: SearchableEntity = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.kind, EntityKind::Product);
        assert_eq!(decoded.review_count, 0);
        assert!(!decoded.verified);
        assert!(decoded.rating.is_none());
        assert!(decoded.coordinates.is_none());
        assert!(decoded.tags.is_empty());
    }

    #[test]
    fn query_serde_roundtrip() {
        let query = SearchQuery {
            query: Some("coffee".to_string()),
            kind: TypeFilter::Shop,
            sort_by: SortBy::Distance,
            location: Some(LocationFilter {
                radius_km: Some(5.0),
                ..LocationFilter::default()
            }),
            user_location: Some(GeoPoint::new(30.0444, 31.2357)),
            ..SearchQuery::default()
        };
        let json = serde_json::to_string(&query).unwrap();
        let decoded: SearchQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, query);
    }

    #[test]
    fn empty_query_json_is_browse() {
        let decoded: SearchQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(decoded, SearchQuery::browse());
        assert_eq!(decoded.kind, TypeFilter::All);
        assert_eq!(decoded.sort_by, SortBy::Relevance);
    }
}
