//! HTTP client for the catalog and geocoding REST API.
//!
//! Wraps `reqwest` with envelope checking and typed response
//! deserialization. Every endpoint inspects the `"success"` flag in the JSON
//! envelope and surfaces failures as [`CatalogError::Api`]. Nothing is
//! retried; callers decide what a failed call means for their cascade.

use std::time::Duration;

use classifind_core::{GeoPoint, ProductRecord};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::types::{ApiResponse, CountryCount, Place, ProductFilter};

const PRODUCTS_PATH: &str = "products";
const COUNTRIES_PATH: &str = "products/countries";
const FORWARD_GEOCODE_PATH: &str = "geo/forward";
const REVERSE_GEOCODE_PATH: &str = "geo/reverse";

/// Client for the catalog REST API.
///
/// Use [`CatalogClient::new`] with the service base URL; tests point it at a
/// wiremock server.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a new client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidConfig`] if
    /// `base_url` is not a usable URL or `api_key` is not a valid header value.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        api_key: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(key)
                .map_err(|e| CatalogError::InvalidConfig(format!("invalid API key: {e}")))?;
            value.set_sensitive(true);
            headers.insert("x-api-key", value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        // Ensure exactly one trailing slash so relative joins append to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| {
            CatalogError::InvalidConfig(format!("invalid base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidConfig(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Searches listings with `GET /products`.
    ///
    /// Entries that are not JSON objects are skipped with a warning; every
    /// other entry is normalized into a [`ProductRecord`].
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Api`] if the service reports `success: false`.
    /// - [`CatalogError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CatalogError::Deserialize`] if `data` is not an array.
    pub async fn search_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, CatalogError> {
        let pairs = filter.query_pairs();
        let params: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let url = self.build_url(PRODUCTS_PATH, &params)?;

        let raw: Vec<serde_json::Value> = self.get_data(&url, "products").await?;
        let total = raw.len();
        let records: Vec<ProductRecord> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(idx, value)| {
                let record = ProductRecord::from_value(value);
                if record.is_none() {
                    tracing::warn!(index = idx, "search_products: skipping non-object entry");
                }
                record
            })
            .collect();

        tracing::debug!(
            params = ?params,
            received = total,
            kept = records.len(),
            "catalog product search complete"
        );
        Ok(records)
    }

    /// Lists countries with active listings via `GET /products/countries`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Api`] if the service reports `success: false`.
    /// - [`CatalogError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CatalogError::Deserialize`] if the response shape is unexpected.
    pub async fn list_active_countries(&self) -> Result<Vec<CountryCount>, CatalogError> {
        let url = self.build_url(COUNTRIES_PATH, &[])?;
        self.get_data(&url, "products/countries").await
    }

    /// Resolves free-form address text to a place via `GET /geo/forward`.
    ///
    /// The returned [`Place`] may lack coordinates; callers must check
    /// [`Place::point`].
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Api`] if the service reports `success: false`.
    /// - [`CatalogError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CatalogError::Deserialize`] if the response shape is unexpected.
    pub async fn forward_geocode(&self, text: &str) -> Result<Place, CatalogError> {
        let url = self.build_url(FORWARD_GEOCODE_PATH, &[("q", text)])?;
        self.get_data(&url, "geo/forward").await
    }

    /// Describes the place at `point` via `GET /geo/reverse`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Api`] if the service reports `success: false`.
    /// - [`CatalogError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CatalogError::Deserialize`] if the response shape is unexpected.
    pub async fn reverse_geocode(&self, point: GeoPoint) -> Result<Place, CatalogError> {
        let lat = point.lat.to_string();
        let lng = point.lng.to_string();
        let url = self.build_url(
            REVERSE_GEOCODE_PATH,
            &[("lat", lat.as_str()), ("lng", lng.as_str())],
        )?;
        self.get_data(&url, "geo/reverse").await
    }

    /// Builds the full request URL with percent-encoded query parameters.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, CatalogError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| CatalogError::InvalidConfig(format!("cannot join '{path}': {e}")))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, checks the envelope, and decodes its `data` member.
    async fn get_data<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, CatalogError> {
        let body = self.request_json(url).await?;
        Self::check_api_error(&body)?;

        let envelope: ApiResponse<T> =
            serde_json::from_value(body).map_err(|e| CatalogError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;
        Ok(envelope.data)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, CatalogError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }

    /// Returns an error when the envelope's `"success"` flag is not `true`.
    fn check_api_error(body: &serde_json::Value) -> Result<(), CatalogError> {
        if body.get("success").and_then(serde_json::Value::as_bool) == Some(true) {
            return Ok(());
        }
        let msg = body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("request was not successful")
            .to_string();
        Err(CatalogError::Api(msg))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
