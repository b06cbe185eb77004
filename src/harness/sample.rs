//! Deterministic sample dataset.
//!
//! A realistic mix of listings sized so every built-in scenario meets its
//! minimum result count. All values derive from the loop index and the
//! supplied `now`, so two calls with the same instant produce identical
//! datasets.

use chrono::{DateTime, Duration, Utc};

use crate::model::{EntityKind, GeoPoint, SearchableEntity};

/// Downtown Cairo, the reference point the built-in scenarios search from.
const CENTER: GeoPoint = GeoPoint {
    latitude: 30.0444,
    longitude: 31.2357,
};

const RESTAURANTS: [&str; 12] = [
    "Nile View",
    "Golden Fork",
    "Cairo Kitchen",
    "Al Amir",
    "Blue Lotus",
    "Desert Rose",
    "Old Town",
    "Garden Gate",
    "Sunset Terrace",
    "Palm Court",
    "Spice Route",
    "River Bend",
];

const COFFEE_SHOPS: [&str; 8] = [
    "Aroma", "Mokka", "Bean Barn", "Roast House", "Cairo Brew", "Petra", "Oasis", "Corner",
];

const DENTAL_CLINICS: [&str; 6] = ["Smile", "Pearl", "Bright", "Downtown", "Family", "New Cairo"];

const BEAUTY_SALONS: [&str; 8] = [
    "Rose",
    "Cleopatra",
    "Velvet",
    "Lotus",
    "Glamour",
    "Silk",
    "Ivory",
    "Jasmine",
];

const FREELANCERS: [&str; 5] = [
    "Amira Hassan",
    "Omar Farouk",
    "Layla Mansour",
    "Karim Adel",
    "Nour El Din",
];

const PRODUCTS: [&str; 8] = [
    "Arabica Coffee Beans 1kg",
    "Ceramic Dinner Set",
    "Handmade Leather Bag",
    "Olive Oil 750ml",
    "Cotton Bath Towels",
    "Brass Table Lamp",
    "Dates Gift Box",
    "Herbal Tea Sampler",
];

/// Build the full sample dataset relative to `now`.
pub fn sample_dataset(now: DateTime<Utc>) -> Vec<SearchableEntity> {
    let mut entities = Vec::with_capacity(47);

    for (i, prefix) in RESTAURANTS.iter().enumerate() {
        let mut e = SearchableEntity::new(
            format!("rest-{i:02}"),
            format!("{prefix} Restaurant"),
            EntityKind::Shop,
        );
        e.description = Some(format!("{prefix} restaurant serving local dishes"));
        e.category = Some("restaurant".to_string());
        e.tags = vec!["food".to_string(), "dining".to_string()];
        e.rating = Some(3.0 + (i % 4) as f64 * 0.5);
        e.review_count = 10 + i as u64 * 15;
        e.verified = i % 2 == 0;
        e.completeness_score = Some(0.5 + (i % 5) as f64 * 0.1);
        e.is_popular = i % 4 == 0;
        e.view_count = 200 * (i as u64 + 1);
        e.booking_count = 12 * i as u64;
        e.coordinates = Some(GeoPoint::new(
            CENTER.latitude + i as f64 * 0.004,
            CENTER.longitude,
        ));
        e.city = Some(if i % 3 == 0 { "Giza" } else { "Cairo" }.to_string());
        e.response_rate = Some(60.0 + (i % 5) as f64 * 8.0);
        e.response_time_minutes = Some(30.0 + i as f64 * 20.0);
        e.is_open = i % 3 != 0;
        e.updated_at = Some(now - Duration::days((i as i64 % 20) + 1));
        e.price = Some(80.0 + i as f64 * 20.0);
        entities.push(e);
    }

    for (i, prefix) in COFFEE_SHOPS.iter().enumerate() {
        let mut e = SearchableEntity::new(
            format!("cafe-{i:02}"),
            format!("{prefix} Coffee House"),
            EntityKind::Shop,
        );
        e.description = Some("Specialty coffee and pastries".to_string());
        e.category = Some("coffee".to_string());
        e.tags = vec!["espresso".to_string(), "latte".to_string()];
        e.rating = Some(3.5 + (i % 3) as f64 * 0.5);
        e.review_count = 5 + i as u64 * 9;
        e.verified = i % 2 == 1;
        e.is_popular = i < 3;
        e.is_trending = i == 0;
        e.view_count = 150 * (i as u64 + 1);
        e.booking_count = 4 * i as u64;
        e.coordinates = Some(GeoPoint::new(
            CENTER.latitude + i as f64 * 0.002,
            CENTER.longitude + i as f64 * 0.001,
        ));
        e.city = Some("Cairo".to_string());
        e.response_rate = Some(70.0 + (i % 4) as f64 * 5.0);
        e.is_open = i % 4 != 3;
        e.last_active_at = Some(now - Duration::days(i as i64 % 6));
        e.price = Some(40.0 + i as f64 * 10.0);
        entities.push(e);
    }

    for (i, prefix) in DENTAL_CLINICS.iter().enumerate() {
        let mut e = SearchableEntity::new(
            format!("dent-{i:02}"),
            format!("{prefix} Dental Clinic"),
            EntityKind::Service,
        );
        e.description = Some("Dentist offering checkups and cosmetic work".to_string());
        e.category = Some("dentist".to_string());
        e.tags = vec!["teeth".to_string(), "clinic".to_string()];
        // The last clinic stays unverified and under-rated for contrast.
        if i < 5 {
            e.rating = Some(4.0 + i as f64 * 0.2);
            e.verified = true;
        } else {
            e.rating = Some(3.8);
            e.verified = false;
        }
        e.review_count = 20 + i as u64 * 14;
        e.completeness_score = Some(0.8);
        e.is_recommended = i == 0;
        e.coordinates = Some(GeoPoint::new(
            CENTER.latitude,
            CENTER.longitude + i as f64 * 0.005,
        ));
        e.city = Some("Cairo".to_string());
        e.response_rate = Some(85.0);
        e.response_time_minutes = Some(60.0 + i as f64 * 45.0);
        e.is_open = i % 2 == 0;
        e.updated_at = Some(now - Duration::days(i as i64 * 3 + 2));
        e.price = Some(200.0 + i as f64 * 50.0);
        entities.push(e);
    }

    for (i, prefix) in BEAUTY_SALONS.iter().enumerate() {
        let mut e = SearchableEntity::new(
            format!("salon-{i:02}"),
            format!("{prefix} Beauty Salon"),
            EntityKind::Service,
        );
        e.description = Some("Hair, nails, and skin care".to_string());
        e.category = Some("beauty".to_string());
        e.tags = vec!["hair".to_string(), "spa".to_string()];
        // The first four satisfy the complex multi-filter scenario.
        if i < 4 {
            e.rating = Some(3.6 + i as f64 * 0.1);
            e.verified = true;
            e.review_count = 15 + i as u64 * 8;
            e.is_open = true;
            e.price = Some(150.0 + i as f64 * 40.0);
        } else {
            e.rating = Some(if i == 4 { 4.2 } else { 3.2 });
            e.verified = i == 5;
            e.review_count = if i == 6 { 0 } else { 6 };
            e.is_open = i % 2 == 0;
            e.price = Some(if i == 7 { 600.0 } else { 90.0 });
        }
        e.coordinates = Some(GeoPoint::new(
            CENTER.latitude - i as f64 * 0.003,
            CENTER.longitude,
        ));
        e.city = Some("Cairo".to_string());
        e.response_rate = Some(65.0 + i as f64 * 3.0);
        e.last_active_at = Some(now - Duration::days(i as i64 % 9));
        entities.push(e);
    }

    for (i, name) in FREELANCERS.iter().enumerate() {
        let mut e = SearchableEntity::new(format!("user-{i:02}"), *name, EntityKind::User);
        e.description = Some("Independent professional".to_string());
        e.category = Some("freelancer".to_string());
        e.rating = if i % 2 == 0 { Some(4.0 + i as f64 * 0.1) } else { None };
        e.review_count = i as u64 * 3;
        e.verified = i == 0;
        e.last_active_at = Some(now - Duration::days(i as i64));
        entities.push(e);
    }

    for (i, name) in PRODUCTS.iter().enumerate() {
        let mut e = SearchableEntity::new(format!("prod-{i:02}"), *name, EntityKind::Product);
        e.category = Some("grocery".to_string());
        e.tags = vec!["retail".to_string()];
        e.rating = if i % 3 == 0 { None } else { Some(3.0 + (i % 5) as f64 * 0.4) };
        e.review_count = i as u64 * 7;
        e.view_count = 90 * (i as u64 + 1);
        e.price = Some(25.0 + i as f64 * 30.0);
        e.updated_at = Some(now - Duration::days(i as i64 * 5));
        entities.push(e);
    }

    entities
}
