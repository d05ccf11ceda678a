//! Catalog service request and response types.
//!
//! Every response is wrapped in a `{"success": bool, "data": ..., "message": ...}`
//! envelope; [`ApiResponse`] captures that pattern generically.

use classifind_core::{GeoBounds, GeoPoint};
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level envelope for all catalog service responses.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Filter for `GET /products`. Unset fields are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Free-text query, sent as `q`.
    pub text: Option<String>,
    /// Server-side ordering, e.g. `"rank"`.
    pub sort: Option<String>,
    pub bounds: Option<GeoBounds>,
    /// ISO alpha-2 country code.
    pub country: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    /// Returns the query parameters for this filter in a stable order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(text) = &self.text {
            pairs.push(("q", text.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(b) = &self.bounds {
            pairs.push(("minLat", b.min_lat.to_string()));
            pairs.push(("maxLat", b.max_lat.to_string()));
            pairs.push(("minLng", b.min_lng.to_string()));
            pairs.push(("maxLng", b.max_lng.to_string()));
        }
        if let Some(country) = &self.country {
            pairs.push(("country", country.clone()));
        }
        if let Some(city) = &self.city {
            pairs.push(("city", city.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs
    }
}

/// A geocoded place from `GET /geo/forward` or `GET /geo/reverse`.
///
/// Reverse lookups usually omit the coordinates; forward lookups must carry
/// them to be usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Place {
    /// The place's coordinates, if both are present and finite.
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.lat?, self.lng?)
    }

    /// Non-blank city name.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        non_blank(self.city.as_deref())
    }

    /// Non-blank country code, uppercased.
    #[must_use]
    pub fn country_code(&self) -> Option<String> {
        non_blank(self.country.as_deref()).map(str::to_ascii_uppercase)
    }

    /// Human-readable `"city, state, country"` built from the parts present.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|p| non_blank(p.as_deref()))
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// One row of `GET /products/countries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub total: u64,
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts numbers, numeric strings, or null.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
