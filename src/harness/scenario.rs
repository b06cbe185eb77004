//! Test scenarios for the performance suite.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::model::{
    GeoPoint, LocationFilter, PriceRange, QueryFilters, SearchQuery, SortBy, TypeFilter,
};

/// One named scenario the suite runs against the sample dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScenario {
    pub id: String,
    pub name: String,
    pub description: String,
    pub query: SearchQuery,
    /// Fewer results than this fails the scenario.
    pub expected_min_results: usize,
    /// Longer execution than this fails the scenario.
    pub expected_max_execution_time_ms: f64,
    /// Relative importance in the suite's aggregate score.
    pub weight: f64,
}

static BUILTIN: Lazy<Vec<TestScenario>> = Lazy::new(|| {
    vec![
        TestScenario {
            id: "basic_text_search".to_string(),
            name: "Basic Text Search".to_string(),
            description: "Simple keyword search without filters".to_string(),
            query: SearchQuery {
                query: Some("restaurant".to_string()),
                kind: TypeFilter::All,
                sort_by: SortBy::Relevance,
                ..SearchQuery::default()
            },
            expected_min_results: 10,
            expected_max_execution_time_ms: 100.0,
            weight: 0.3,
        },
        TestScenario {
            id: "location_based_search".to_string(),
            name: "Location-Based Search".to_string(),
            description: "Search with location and radius filters".to_string(),
            query: SearchQuery {
                query: Some("coffee".to_string()),
                kind: TypeFilter::Shop,
                sort_by: SortBy::Distance,
                location: Some(LocationFilter {
                    radius_km: Some(5.0),
                    ..LocationFilter::default()
                }),
                user_location: Some(GeoPoint::new(30.0444, 31.2357)),
                ..SearchQuery::default()
            },
            expected_min_results: 5,
            expected_max_execution_time_ms: 150.0,
            weight: 0.4,
        },
        TestScenario {
            id: "filtered_search".to_string(),
            name: "Filtered Search".to_string(),
            description: "Search with multiple quality filters".to_string(),
            query: SearchQuery {
                query: Some("dentist".to_string()),
                kind: TypeFilter::Service,
                sort_by: SortBy::Rating,
                filters: QueryFilters {
                    verified: true,
                    has_reviews: true,
                    min_rating: Some(4.0),
                    ..QueryFilters::default()
                },
                ..SearchQuery::default()
            },
            expected_min_results: 3,
            expected_max_execution_time_ms: 200.0,
            weight: 0.5,
        },
        TestScenario {
            id: "empty_query_browse".to_string(),
            name: "Empty Query Browse".to_string(),
            description: "Browse without search query (popular results)".to_string(),
            query: SearchQuery {
                kind: TypeFilter::All,
                sort_by: SortBy::Popularity,
                ..SearchQuery::default()
            },
            expected_min_results: 20,
            expected_max_execution_time_ms: 80.0,
            weight: 0.2,
        },
        TestScenario {
            id: "complex_search".to_string(),
            name: "Complex Multi-Filter Search".to_string(),
            description: "Search with multiple filters and location".to_string(),
            query: SearchQuery {
                query: Some("beauty salon".to_string()),
                kind: TypeFilter::Service,
                sort_by: SortBy::Relevance,
                location: Some(LocationFilter {
                    city: Some("Cairo".to_string()),
                    radius_km: Some(10.0),
                    ..LocationFilter::default()
                }),
                filters: QueryFilters {
                    verified: true,
                    has_reviews: true,
                    min_rating: Some(3.5),
                    price_range: Some(PriceRange {
                        min: 50.0,
                        max: 500.0,
                    }),
                    open_now: true,
                },
                user_location: Some(GeoPoint::new(30.0444, 31.2357)),
                ..SearchQuery::default()
            },
            expected_min_results: 2,
            expected_max_execution_time_ms: 250.0,
            weight: 0.6,
        },
    ]
});

/// The built-in scenario set covering the main search shapes.
pub fn builtin_scenarios() -> &'static [TestScenario] {
    &BUILTIN
}
