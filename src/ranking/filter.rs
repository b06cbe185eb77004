//! Predicate-based subset selection over entities.
//!
//! All active predicates AND together; absent query fields impose no
//! constraint. Entities missing a field required by an active filter are
//! excluded (fail-closed). Output preserves input order.

use crate::model::{SearchQuery, SearchableEntity};

use super::geo::haversine_km;

/// Return the entities satisfying every active predicate of `query`.
pub fn filter_entities(entities: &[SearchableEntity], query: &SearchQuery) -> Vec<SearchableEntity> {
    entities
        .iter()
        .filter(|entity| matches_query(entity, query))
        .cloned()
        .collect()
}

/// Whether one entity passes every active predicate.
pub fn matches_query(entity: &SearchableEntity, query: &SearchQuery) -> bool {
    if !query.kind.matches(entity.kind) {
        return false;
    }

    // Exact category equality, no case folding.
    if let Some(category) = &query.category {
        if entity.category.as_deref() != Some(category.as_str()) {
            return false;
        }
    }

    // Radius filter is active only when both a radius and a user location
    // are present. While active, entities without coordinates are excluded.
    if let Some(radius_km) = query.location.as_ref().and_then(|l| l.radius_km) {
        if let Some(user) = query.user_location {
            match entity.coordinates {
                Some(point) => {
                    if haversine_km(user, point) > radius_km {
                        return false;
                    }
                }
                None => return false,
            }
        }
    }

    let filters = &query.filters;

    if filters.verified && !entity.verified {
        return false;
    }

    if filters.has_reviews && entity.review_count == 0 {
        return false;
    }

    if let Some(min_rating) = filters.min_rating {
        match entity.rating {
            Some(rating) if rating >= min_rating => {}
            _ => return false,
        }
    }

    if let Some(range) = &filters.price_range {
        match entity.price {
            Some(price) if range.contains(price) => {}
            _ => return false,
        }
    }

    if filters.open_now && !entity.is_open {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        EntityKind, GeoPoint, LocationFilter, PriceRange, QueryFilters, TypeFilter,
    };

    fn shop(id: &str) -> SearchableEntity {
        SearchableEntity::new(id, format!("Shop {id}"), EntityKind::Shop)
    }

    #[test]
    fn browse_query_keeps_everything_in_order() {
        let entities = vec![shop("a"), shop("b"), shop("c")];
        let kept = filter_entities(&entities, &SearchQuery::browse());
        let ids: Vec<&str> = kept.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn type_filter_excludes_other_kinds() {
        let mut service = shop("s");
        service.kind = EntityKind::Service;
        let entities = vec![shop("a"), service];
        let query = SearchQuery {
            kind: TypeFilter::Service,
            ..SearchQuery::default()
        };
        let kept = filter_entities(&entities, &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "s");
    }

    #[test]
    fn category_is_exact_case_sensitive() {
        let mut a = shop("a");
        a.category = Some("Coffee".to_string());
        let mut b = shop("b");
        b.category = Some("coffee".to_string());
        let query = SearchQuery {
            category: Some("coffee".to_string()),
            ..SearchQuery::default()
        };
        let kept = filter_entities(&[a, b], &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "b");
    }

    #[test]
    fn missing_category_fails_category_filter() {
        let query = SearchQuery {
            category: Some("coffee".to_string()),
            ..SearchQuery::default()
        };
        assert!(filter_entities(&[shop("a")], &query).is_empty());
    }

    #[test]
    fn radius_excludes_far_and_coordless_entities() {
        let mut near = shop("near");
        near.coordinates = Some(GeoPoint::new(30.05, 31.24));
        let mut far = shop("far");
        far.coordinates = Some(GeoPoint::new(31.2, 29.9));
        let coordless = shop("coordless");

        let query = SearchQuery {
            location: Some(LocationFilter {
                radius_km: Some(5.0),
                ..LocationFilter::default()
            }),
            user_location: Some(GeoPoint::new(30.0444, 31.2357)),
            ..SearchQuery::default()
        };
        let kept = filter_entities(&[near, far, coordless], &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "near");
    }

    #[test]
    fn radius_without_user_location_is_inactive() {
        let coordless = shop("coordless");
        let query = SearchQuery {
            location: Some(LocationFilter {
                radius_km: Some(5.0),
                ..LocationFilter::default()
            }),
            ..SearchQuery::default()
        };
        assert_eq!(filter_entities(&[coordless], &query).len(), 1);
    }

    #[test]
    fn verified_flag_requires_verified() {
        let mut v = shop("v");
        v.verified = true;
        let u = shop("u");
        let query = SearchQuery {
            filters: QueryFilters {
                verified: true,
                ..QueryFilters::default()
            },
            ..SearchQuery::default()
        };
        let kept = filter_entities(&[v, u], &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "v");
    }

    #[test]
    fn has_reviews_requires_nonzero_count() {
        let mut reviewed = shop("reviewed");
        reviewed.review_count = 3;
        let unreviewed = shop("unreviewed");
        let query = SearchQuery {
            filters: QueryFilters {
                has_reviews: true,
                ..QueryFilters::default()
            },
            ..SearchQuery::default()
        };
        let kept = filter_entities(&[reviewed, unreviewed], &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "reviewed");
    }

    #[test]
    fn min_rating_fails_closed_on_missing_rating() {
        let mut rated = shop("rated");
        rated.rating = Some(4.2);
        let mut low = shop("low");
        low.rating = Some(3.9);
        let unrated = shop("unrated");
        let query = SearchQuery {
            filters: QueryFilters {
                min_rating: Some(4.0),
                ..QueryFilters::default()
            },
            ..SearchQuery::default()
        };
        let kept = filter_entities(&[rated, low, unrated], &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "rated");
    }

    #[test]
    fn price_range_is_inclusive_and_fails_closed() {
        let mut cheap = shop("cheap");
        cheap.price = Some(49.0);
        let mut fair = shop("fair");
        fair.price = Some(50.0);
        let unpriced = shop("unpriced");
        let query = SearchQuery {
            filters: QueryFilters {
                price_range: Some(PriceRange {
                    min: 50.0,
                    max: 500.0,
                }),
                ..QueryFilters::default()
            },
            ..SearchQuery::default()
        };
        let kept = filter_entities(&[cheap, fair, unpriced], &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "fair");
    }

    #[test]
    fn open_now_requires_open() {
        let mut open = shop("open");
        open.is_open = true;
        let closed = shop("closed");
        let query = SearchQuery {
            filters: QueryFilters {
                open_now: true,
                ..QueryFilters::default()
            },
            ..SearchQuery::default()
        };
        let kept = filter_entities(&[open, closed], &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "open");
    }

    #[test]
    fn predicates_combine_with_and() {
        let mut good = shop("good");
        good.verified = true;
        good.review_count = 10;
        good.rating = Some(4.5);
        let mut half = shop("half");
        half.verified = true;
        let query = SearchQuery {
            filters: QueryFilters {
                verified: true,
                has_reviews: true,
                min_rating: Some(4.0),
                ..QueryFilters::default()
            },
            ..SearchQuery::default()
        };
        let kept = filter_entities(&[good, half], &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "good");
    }
}
