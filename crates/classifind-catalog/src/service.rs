use std::future::Future;

use classifind_core::{GeoPoint, ProductRecord};

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::types::{CountryCount, Place, ProductFilter};

/// The remote operations the search engine depends on.
///
/// [`CatalogClient`] is the production implementation; tests substitute
/// in-memory catalogs.
pub trait CatalogService: Send + Sync {
    fn search_products(
        &self,
        filter: &ProductFilter,
    ) -> impl Future<Output = Result<Vec<ProductRecord>, CatalogError>> + Send;

    fn forward_geocode(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Place, CatalogError>> + Send;

    fn reverse_geocode(
        &self,
        point: GeoPoint,
    ) -> impl Future<Output = Result<Place, CatalogError>> + Send;

    fn list_active_countries(
        &self,
    ) -> impl Future<Output = Result<Vec<CountryCount>, CatalogError>> + Send;
}

impl CatalogService for CatalogClient {
    async fn search_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, CatalogError> {
        CatalogClient::search_products(self, filter).await
    }

    async fn forward_geocode(&self, text: &str) -> Result<Place, CatalogError> {
        CatalogClient::forward_geocode(self, text).await
    }

    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Place, CatalogError> {
        CatalogClient::reverse_geocode(self, point).await
    }

    async fn list_active_countries(&self) -> Result<Vec<CountryCount>, CatalogError> {
        CatalogClient::list_active_countries(self).await
    }
}
