//! Requests, results, and tuning knobs of the reconciliation engine.

use std::time::Duration;

use classifind_catalog::ProductFilter;
use classifind_core::{AppConfig, GeoBounds, GeoPoint, ProductRecord};
use serde::Serialize;

use crate::error::SearchError;
use crate::geo::DEFAULT_POINT_DELTA;
use crate::merge::merge;

/// Label shown for map-region results when the centroid could not be named.
pub const MAP_AREA_LABEL: &str = "Área do mapa";

/// Label shown for GPS results when reverse geocoding yields no place name.
pub const NEAR_YOU_LABEL: &str = "Perto de você";

/// Geographic constraint attached to a catalog query.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoScope {
    /// ISO alpha-2 country code, uppercase.
    Country(String),
    Bbox(GeoBounds),
}

impl GeoScope {
    /// Builds a country scope from user input: two ASCII letters, any case.
    #[must_use]
    pub fn country(code: &str) -> Option<Self> {
        let code = code.trim();
        (code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
            .then(|| Self::Country(code.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn country_code(&self) -> Option<&str> {
        match self {
            Self::Country(code) => Some(code),
            Self::Bbox(_) => None,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Option<GeoBounds> {
        match self {
            Self::Country(_) => None,
            Self::Bbox(bounds) => Some(*bounds),
        }
    }

    /// Rejects a scope whose values cannot be sent to the catalog: a country
    /// that is not two uppercase ASCII letters, or an invalid box.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Input`] describing the unusable value.
    pub fn validate(&self) -> Result<(), SearchError> {
        match self {
            Self::Country(code)
                if code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase()) =>
            {
                Ok(())
            }
            Self::Country(code) => {
                Err(SearchError::Input(format!("invalid country code {code:?}")))
            }
            Self::Bbox(bounds) if bounds.is_valid() => Ok(()),
            Self::Bbox(bounds) => Err(SearchError::Input(format!("invalid map bounds {bounds:?}"))),
        }
    }

    /// Human-readable description of the applied scope.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Country(code) => format!("País: {code}"),
            Self::Bbox(_) => MAP_AREA_LABEL.to_string(),
        }
    }

    /// Writes this scope's query parameters into `filter`.
    pub fn apply(&self, filter: &mut ProductFilter) {
        match self {
            Self::Country(code) => filter.country = Some(code.clone()),
            Self::Bbox(bounds) => filter.bounds = Some(*bounds),
        }
    }
}

/// Input to one text-search reconciliation cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub text: Option<String>,
    pub scope: GeoScope,
    pub category: Option<String>,
}

/// Final output of a reconciliation cycle.
///
/// `items` never holds two records with the same key; [`ReconciledResult::new`]
/// deduplicates on construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledResult {
    pub items: Vec<ProductRecord>,
    pub applied_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<GeoBounds>,
}

impl ReconciledResult {
    #[must_use]
    pub fn new(items: Vec<ProductRecord>, applied_label: impl Into<String>) -> Self {
        Self {
            items: merge([items]),
            applied_label: applied_label.into(),
            applied_country: None,
            applied_city: None,
            center: None,
            bounds: None,
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.applied_country = country;
        self
    }

    #[must_use]
    pub fn with_city(mut self, city: Option<String>) -> Self {
        self.applied_city = city;
        self
    }

    #[must_use]
    pub fn with_area(mut self, center: Option<GeoPoint>, bounds: Option<GeoBounds>) -> Self {
        self.center = center;
        self.bounds = bounds;
        self
    }
}

/// Map-region result plus the keys of the records the bounding box itself
/// returned, for callers merging into an existing list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionResult {
    #[serde(flatten)]
    pub result: ReconciledResult,
    pub priority_keys: Vec<String>,
}

/// Which discovery path produced an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Text,
    Address,
    Gps,
    Region,
    Country,
    Category,
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SearchKind::Text => "text",
            SearchKind::Address => "address",
            SearchKind::Gps => "gps",
            SearchKind::Region => "region",
            SearchKind::Country => "country",
            SearchKind::Category => "category",
        };
        f.write_str(name)
    }
}

/// Tuning knobs for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Sent as `sort` on every product query.
    pub sort: Option<String>,
    /// A text-search candidate list shorter than this is topped up from the
    /// broad fallback query.
    pub few_results_threshold: usize,
    /// Half-side, in degrees, of boxes built around geocoded or GPS points.
    pub point_delta: f64,
    /// Upper bound on waiting for a device position.
    pub gps_timeout: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            sort: Some("rank".to_string()),
            few_results_threshold: 6,
            point_delta: DEFAULT_POINT_DELTA,
            gps_timeout: Duration::from_secs(10),
        }
    }
}

impl SearchSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            sort: Some(config.default_sort.clone()).filter(|s| !s.is_empty()),
            few_results_threshold: config.few_results_threshold,
            point_delta: config.point_delta,
            gps_timeout: Duration::from_secs(config.gps_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn country_scope_validates_and_uppercases() {
        assert_eq!(GeoScope::country(" br "), Some(GeoScope::Country("BR".into())));
        assert!(GeoScope::country("BRA").is_none());
        assert!(GeoScope::country("1B").is_none());
        assert!(GeoScope::country("").is_none());
    }

    #[test]
    fn validate_rejects_hand_built_bad_scopes() {
        let inverted = GeoBounds {
            min_lat: 10.0,
            max_lat: 5.0,
            min_lng: 0.0,
            max_lng: 1.0,
        };
        let partial = GeoBounds {
            min_lat: 0.0,
            max_lat: 1.0,
            min_lng: f64::NAN,
            max_lng: 1.0,
        };
        assert!(matches!(
            GeoScope::Bbox(inverted).validate(),
            Err(SearchError::Input(_))
        ));
        assert!(matches!(
            GeoScope::Bbox(partial).validate(),
            Err(SearchError::Input(_))
        ));
        assert!(GeoScope::Country("br".into()).validate().is_err());
        assert!(GeoScope::Country("BRA".into()).validate().is_err());

        assert!(GeoScope::Country("BR".into()).validate().is_ok());
        let ok = GeoBounds::new(0.0, 1.0, 0.0, 1.0).unwrap();
        assert!(GeoScope::Bbox(ok).validate().is_ok());
    }

    #[test]
    fn scope_applies_its_params() {
        let mut filter = ProductFilter::default();
        GeoScope::Country("PT".into()).apply(&mut filter);
        assert_eq!(filter.country.as_deref(), Some("PT"));
        assert!(filter.bounds.is_none());

        let bounds = GeoBounds::new(0.0, 1.0, 0.0, 1.0).unwrap();
        let mut filter = ProductFilter::default();
        GeoScope::Bbox(bounds).apply(&mut filter);
        assert_eq!(filter.bounds, Some(bounds));
    }

    #[test]
    fn reconciled_result_deduplicates_items() {
        let item = ProductRecord::from_value(json!({ "id": 1 })).unwrap();
        let result = ReconciledResult::new(vec![item.clone(), item], "x");
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn region_result_serializes_flat() {
        let result = RegionResult {
            result: ReconciledResult::new(Vec::new(), MAP_AREA_LABEL),
            priority_keys: vec!["id:1".into()],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["applied_label"], MAP_AREA_LABEL);
        assert_eq!(value["priority_keys"][0], "id:1");
    }
}
