//! Flat latitude/longitude primitives.
//!
//! Bounding boxes are axis-aligned rectangles in degree space; nothing here
//! accounts for the curvature of the earth or the antimeridian.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Returns a point only when both coordinates are finite.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        (lat.is_finite() && lng.is_finite()).then_some(Self { lat, lng })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    /// Validating constructor: `None` unless [`GeoBounds::is_valid`] holds.
    #[must_use]
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Option<Self> {
        let bounds = Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        };
        bounds.is_valid().then_some(bounds)
    }

    /// All four fields finite and `min <= max` on both axes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.min_lat, self.max_lat, self.min_lng, self.max_lng]
            .iter()
            .all(|v| v.is_finite())
            && self.min_lat <= self.max_lat
            && self.min_lng <= self.max_lng
    }

    /// Arithmetic midpoint of the rectangle.
    #[must_use]
    pub fn centroid(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lng: (self.min_lng + self.max_lng) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_rejects_non_finite_coordinates() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_none());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_none());
        assert!(GeoPoint::new(-23.5, -46.6).is_some());
    }

    #[test]
    fn inverted_latitude_is_invalid() {
        let bounds = GeoBounds {
            min_lat: 10.0,
            max_lat: 5.0,
            min_lng: 0.0,
            max_lng: 1.0,
        };
        assert!(!bounds.is_valid());
        assert!(GeoBounds::new(10.0, 5.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn non_finite_field_is_invalid() {
        assert!(GeoBounds::new(0.0, f64::NAN, 0.0, 1.0).is_none());
    }

    #[test]
    fn degenerate_rectangle_is_valid() {
        assert!(GeoBounds::new(1.0, 1.0, 2.0, 2.0).is_some());
    }

    #[test]
    fn centroid_is_midpoint() {
        let bounds = GeoBounds::new(-24.0, -23.0, -47.0, -46.0).unwrap();
        assert_eq!(
            bounds.centroid(),
            GeoPoint {
                lat: -23.5,
                lng: -46.5
            }
        );
    }
}
