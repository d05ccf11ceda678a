//! Normalized catalog records.
//!
//! The catalog service returns loosely-typed listing payloads whose field
//! names vary by listing type and API version (`lat`/`latitude`,
//! `serviceType`/`service_type`, nested `realEstate` bags, ...). Every payload
//! passes through [`ProductRecord::from_value`] exactly once at ingestion so
//! downstream code reads one stable shape. The original JSON is kept in
//! [`ProductRecord::raw`] for display and for last-resort identity.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

const LAT_ALIASES: &[&str] = &["lat", "latitude"];
const LNG_ALIASES: &[&str] = &["lng", "lon", "long", "longitude"];
const CITY_ALIASES: &[&str] = &["city", "cidade"];
const STATE_ALIASES: &[&str] = &["state", "uf", "estado"];
const COUNTRY_ALIASES: &[&str] = &["country", "country_code", "countryCode", "pais"];
const PRODUCT_ID_ALIASES: &[&str] = &["product_id", "productId"];

/// Domain-specific listing attributes, keyed by canonical name with every
/// accepted spelling.
const ATTRIBUTE_ALIASES: &[(&str, &[&str])] = &[
    ("service_type", &["service_type", "serviceType"]),
    ("service_area", &["service_area", "serviceArea"]),
    ("property_type", &["property_type", "propertyType"]),
    ("job_type", &["job_type", "jobType"]),
    ("work_mode", &["work_mode", "workMode"]),
    ("bedrooms", &["bedrooms"]),
    ("bathrooms", &["bathrooms"]),
    ("area", &["area"]),
    ("salary", &["salary"]),
    ("company", &["company"]),
    ("condition", &["condition"]),
    ("year", &["year"]),
    ("size", &["size"]),
    ("material", &["material"]),
];

/// Nested objects whose scalar members are all treated as attributes.
const ATTRIBUTE_BAGS: &[&str] = &[
    "attributes",
    "details",
    "real_estate",
    "realEstate",
    "job",
    "service",
];

/// A catalog listing with its known aliases resolved onto canonical fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "Value")]
pub struct ProductRecord {
    pub id: Option<String>,
    pub product_id: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    /// Finite latitude, if the payload carried one under any alias.
    pub lat: Option<f64>,
    /// Finite longitude, if the payload carried one under any alias.
    pub lng: Option<f64>,
    /// Listing-type specific attributes (real estate, jobs, services).
    /// Members of nested bags are keyed as `"<bag>.<field>"`.
    pub attributes: BTreeMap<String, String>,
    /// The payload exactly as received.
    pub raw: Value,
}

impl ProductRecord {
    /// Builds a record from a catalog payload.
    ///
    /// Returns `None` for anything other than a JSON object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from_map(map)),
            _ => None,
        }
    }

    /// Builds a record from an already-destructured JSON object. Never fails:
    /// unknown or malformed fields are simply left unset.
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        let text = |keys: &[&str]| first_present(&map, keys).and_then(scalar_text);
        let number = |keys: &[&str]| first_present(&map, keys).and_then(finite_number);

        let mut attributes = BTreeMap::new();
        for (canonical, aliases) in ATTRIBUTE_ALIASES {
            if let Some(value) = first_present(&map, aliases).and_then(flat_text) {
                attributes.insert((*canonical).to_string(), value);
            }
        }
        for bag in ATTRIBUTE_BAGS {
            if let Some(Value::Object(inner)) = map.get(*bag) {
                for (field, value) in inner {
                    if let Some(value) = flat_text(value) {
                        attributes
                            .entry(format!("{bag}.{field}"))
                            .or_insert(value);
                    }
                }
            }
        }

        Self {
            id: map.get("id").and_then(identifier),
            product_id: first_present(&map, PRODUCT_ID_ALIASES).and_then(identifier),
            title: text(&["title"]),
            category: text(&["category"]),
            description: text(&["description"]),
            tags: map.get("tags").map(tag_list).unwrap_or_default(),
            brand: text(&["brand"]),
            model: text(&["model"]),
            color: text(&["color"]),
            city: text(CITY_ALIASES),
            state: text(STATE_ALIASES),
            country: text(COUNTRY_ALIASES),
            lat: number(LAT_ALIASES),
            lng: number(LNG_ALIASES),
            attributes,
            raw: Value::Object(map),
        }
    }

    /// Returns `(lat, lng)` when both coordinates resolved to finite numbers.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lng)
    }

    /// Returns `true` if the listing carries usable coordinates.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.coordinates().is_some()
    }

    /// Concatenates every free-text field used for local query matching.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        let singles = [
            &self.title,
            &self.description,
            &self.category,
            &self.brand,
            &self.model,
            &self.color,
            &self.city,
            &self.state,
            &self.country,
        ];

        singles
            .into_iter()
            .flatten()
            .map(String::as_str)
            .chain(self.tags.iter().map(String::as_str))
            .chain(self.attributes.values().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<ProductRecord> for Value {
    fn from(record: ProductRecord) -> Self {
        record.raw
    }
}

fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}

/// Identifiers may arrive as strings or numbers.
fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(number_text(n)),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Scalar text, or the space-joined scalar members of an array.
fn flat_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            }
        }
        other => scalar_text(other),
    }
}

fn tag_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        Value::String(s) => s.split(',').filter_map(non_empty).collect(),
        _ => Vec::new(),
    }
}

fn finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Renders integral numbers without a fractional part (`5.0` → `"5"`).
fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        #[allow(clippy::cast_possible_truncation)]
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
