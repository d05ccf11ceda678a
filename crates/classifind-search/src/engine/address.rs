use classifind_catalog::CatalogService;
use classifind_core::ProductRecord;

use super::SearchEngine;
use crate::error::SearchError;
use crate::geo::bounds_from_point;
use crate::normalize::normalize;
use crate::types::{ReconciledResult, SearchKind};

impl<C: CatalogService> SearchEngine<C> {
    /// Listings around a free-form address.
    ///
    /// Tiers, first non-empty wins: the box around the geocoded point, the
    /// geocoded city, then an unscoped query narrowed to listings whose city
    /// matches exactly.
    pub async fn run_address_search(&self, text: &str) -> Result<ReconciledResult, SearchError> {
        self.tracked(SearchKind::Address, self.address_cascade(text))
            .await
    }

    async fn address_cascade(&self, text: &str) -> Result<ReconciledResult, SearchError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SearchError::Input("empty address".to_string()));
        }

        let place = match self.catalog.forward_geocode(text).await {
            Ok(place) => place,
            Err(e) => {
                tracing::warn!(address = text, error = %e, "forward geocoding failed");
                return Err(SearchError::Geocoding(text.to_string()));
            }
        };
        let center = place
            .point()
            .ok_or_else(|| SearchError::Geocoding(text.to_string()))?;
        let bounds = bounds_from_point(center.lat, center.lng, self.settings.point_delta)
            .ok_or_else(|| SearchError::Geocoding(text.to_string()))?;

        let city = place.city().map(str::to_string);
        let country = place.country_code();
        let label = place.label().unwrap_or_else(|| text.to_string());

        let mut filter = self.base_filter();
        filter.bounds = Some(bounds);
        let mut items = self.catalog.search_products(&filter).await?;
        tracing::debug!(tier = "bbox", count = items.len(), "address search tier");

        if let Some(city) = &city {
            if items.is_empty() {
                let mut filter = self.base_filter();
                filter.city = Some(city.clone());
                items = self.catalog.search_products(&filter).await?;
                tracing::debug!(tier = "city", count = items.len(), "address search tier");
            }
            if items.is_empty() {
                let broad = self.catalog.search_products(&self.base_filter()).await?;
                items = in_city(broad, city);
                tracing::debug!(tier = "broad", count = items.len(), "address search tier");
            }
        }

        if items.is_empty() {
            return Err(SearchError::NoResults(label));
        }

        Ok(ReconciledResult::new(items, label)
            .with_country(country)
            .with_city(city)
            .with_area(Some(center), Some(bounds)))
    }
}

/// Listings whose city equals `city` after normalization.
fn in_city(records: Vec<ProductRecord>, city: &str) -> Vec<ProductRecord> {
    let wanted = normalize(city);
    records
        .into_iter()
        .filter(|r| r.city.as_deref().is_some_and(|c| normalize(c) == wanted))
        .collect()
}
