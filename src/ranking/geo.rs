//! Great-circle distance.

use crate::model::GeoPoint;

/// Earth's mean radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_distance_is_zero() {
        let cairo = GeoPoint::new(30.0444, 31.2357);
        assert!(haversine_km(cairo, cairo).abs() < 1e-6);
    }

    #[test]
    fn cairo_to_alexandria_is_about_180km() {
        let cairo = GeoPoint::new(30.0444, 31.2357);
        let alexandria = GeoPoint::new(31.2001, 29.9187);
        let d = haversine_km(cairo, alexandria);
        assert!(d > 170.0 && d < 190.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(30.0444, 31.2357);
        let b = GeoPoint::new(30.0626, 31.2497);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_latitude_is_about_111km() {
        let a = GeoPoint::new(30.0, 31.0);
        let b = GeoPoint::new(31.0, 31.0);
        let d = haversine_km(a, b);
        assert!(d > 110.0 && d < 112.5, "got {d}");
    }
}
