//! In-memory catalog used by the engine tests.

use std::sync::Mutex;
use std::time::Duration;

use classifind_catalog::{CatalogError, CatalogService, CountryCount, Place, ProductFilter};
use classifind_core::{GeoPoint, ProductRecord};
use serde_json::Value;

type Matcher = Box<dyn Fn(&ProductFilter) -> bool + Send + Sync>;

#[derive(Clone)]
enum Reply {
    Items(Vec<ProductRecord>),
    Delayed(Duration, Vec<ProductRecord>),
    Fail(String),
}

/// Catalog answering product queries from a list of `(matcher, reply)`
/// routes; the first matching route wins and unmatched queries return an
/// empty list. Geocoders without a configured place fail.
#[derive(Default)]
pub struct StubCatalog {
    routes: Vec<(Matcher, Reply)>,
    forward: Option<Place>,
    reverse: Option<Place>,
    countries: Vec<CountryCount>,
    calls: Mutex<Vec<ProductFilter>>,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_products(
        mut self,
        matcher: impl Fn(&ProductFilter) -> bool + Send + Sync + 'static,
        items: Vec<Value>,
    ) -> Self {
        self.routes
            .push((Box::new(matcher), Reply::Items(records(items))));
        self
    }

    pub fn on_products_after(
        mut self,
        matcher: impl Fn(&ProductFilter) -> bool + Send + Sync + 'static,
        delay: Duration,
        items: Vec<Value>,
    ) -> Self {
        self.routes
            .push((Box::new(matcher), Reply::Delayed(delay, records(items))));
        self
    }

    pub fn fail_products(
        mut self,
        matcher: impl Fn(&ProductFilter) -> bool + Send + Sync + 'static,
        message: &str,
    ) -> Self {
        self.routes
            .push((Box::new(matcher), Reply::Fail(message.to_string())));
        self
    }

    pub fn with_forward(mut self, place: Place) -> Self {
        self.forward = Some(place);
        self
    }

    pub fn with_reverse(mut self, place: Place) -> Self {
        self.reverse = Some(place);
        self
    }

    pub fn with_countries(mut self, countries: &[(&str, u64)]) -> Self {
        self.countries = countries
            .iter()
            .map(|(country, total)| CountryCount {
                country: (*country).to_string(),
                total: *total,
            })
            .collect();
        self
    }

    /// Every product filter received so far, in call order.
    pub fn product_calls(&self) -> Vec<ProductFilter> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl CatalogService for StubCatalog {
    async fn search_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, CatalogError> {
        self.calls.lock().expect("calls lock").push(filter.clone());
        let reply = self
            .routes
            .iter()
            .find(|(matches, _)| matches(filter))
            .map(|(_, reply)| reply.clone());

        match reply {
            None => Ok(Vec::new()),
            Some(Reply::Items(items)) => Ok(items),
            Some(Reply::Delayed(delay, items)) => {
                tokio::time::sleep(delay).await;
                Ok(items)
            }
            Some(Reply::Fail(message)) => Err(CatalogError::Api(message)),
        }
    }

    async fn forward_geocode(&self, _text: &str) -> Result<Place, CatalogError> {
        self.forward
            .clone()
            .ok_or_else(|| CatalogError::Api("address not found".to_string()))
    }

    async fn reverse_geocode(&self, _point: GeoPoint) -> Result<Place, CatalogError> {
        self.reverse
            .clone()
            .ok_or_else(|| CatalogError::Api("geocoder unavailable".to_string()))
    }

    async fn list_active_countries(&self) -> Result<Vec<CountryCount>, CatalogError> {
        Ok(self.countries.clone())
    }
}

pub fn records(values: Vec<Value>) -> Vec<ProductRecord> {
    values
        .into_iter()
        .map(|v| ProductRecord::from_value(v).expect("fixture must be a JSON object"))
        .collect()
}

pub fn place(city: &str, state: &str, country: &str) -> Place {
    Place {
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        country: Some(country.to_string()),
        ..Place::default()
    }
}

pub fn ids(items: &[ProductRecord]) -> Vec<&str> {
    items.iter().filter_map(|r| r.id.as_deref()).collect()
}
