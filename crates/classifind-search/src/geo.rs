//! Bounding-box derivation for geo-scoped searches.
//!
//! Every resolver returns `None` instead of a partially-defined box; callers
//! fall back to a country scope rather than searching stale coordinates.

use serde::{Deserialize, Serialize};

pub use classifind_core::{GeoBounds, GeoPoint};

/// Half-side, in degrees, of the square built around a point when no map zoom
/// is known.
pub const DEFAULT_POINT_DELTA: f64 = 0.05;

const MIN_ZOOM_DELTA: f64 = 0.02;
const ZOOM_DELTA_PER_LEVEL: f64 = 0.003;

/// Snapshot of an interactive map's viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MapViewport {
    pub bounds: Option<GeoBounds>,
    pub center: Option<GeoPoint>,
    pub zoom: Option<f64>,
}

/// Point delta for a given map zoom level: `max(0.02, zoom * 0.003)`.
#[must_use]
pub fn delta_for_zoom(zoom: f64) -> f64 {
    (zoom * ZOOM_DELTA_PER_LEVEL).max(MIN_ZOOM_DELTA)
}

/// Square region of half-side `delta` centred on `(lat, lng)`.
#[must_use]
pub fn bounds_from_point(lat: f64, lng: f64, delta: f64) -> Option<GeoBounds> {
    if !delta.is_finite() {
        return None;
    }
    let delta = delta.abs();
    GeoBounds::new(lat - delta, lat + delta, lng - delta, lng + delta)
}

/// The viewport's own bounds when valid, otherwise a square around its
/// center sized by its zoom level.
#[must_use]
pub fn bounds_from_viewport(viewport: &MapViewport) -> Option<GeoBounds> {
    if let Some(bounds) = viewport.bounds.filter(GeoBounds::is_valid) {
        return Some(bounds);
    }
    let center = viewport.center?;
    let delta = viewport.zoom.map_or(DEFAULT_POINT_DELTA, delta_for_zoom);
    bounds_from_point(center.lat, center.lng, delta)
}

/// Parses `"minLat,maxLat,minLng,maxLng"`.
#[must_use]
pub fn parse_bbox(input: &str) -> Option<GeoBounds> {
    let values: Vec<f64> = input
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect::<Option<_>>()?;
    match values.as_slice() {
        [min_lat, max_lat, min_lng, max_lng] => {
            GeoBounds::new(*min_lat, *max_lat, *min_lng, *max_lng)
        }
        _ => None,
    }
}
