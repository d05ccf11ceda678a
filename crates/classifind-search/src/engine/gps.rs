use classifind_catalog::{CatalogService, Place};
use futures::future::join;

use super::SearchEngine;
use crate::error::SearchError;
use crate::geo::bounds_from_point;
use crate::location::DeviceLocator;
use crate::types::{ReconciledResult, SearchKind, NEAR_YOU_LABEL};

impl<C: CatalogService> SearchEngine<C> {
    /// Listings around the device's current position.
    ///
    /// The position is requested once and bounded by `gps_timeout`. Naming
    /// the position is best-effort: without it the result is labelled
    /// "Perto de você".
    pub async fn run_gps_search<L: DeviceLocator>(
        &self,
        locator: &L,
    ) -> Result<ReconciledResult, SearchError> {
        self.tracked(SearchKind::Gps, self.gps_cascade(locator)).await
    }

    async fn gps_cascade<L: DeviceLocator>(
        &self,
        locator: &L,
    ) -> Result<ReconciledResult, SearchError> {
        let timeout = self.settings.gps_timeout;
        let point = match tokio::time::timeout(timeout, locator.current_position()).await {
            Ok(Ok(point)) => point,
            Ok(Err(e)) => return Err(SearchError::Location(e.to_string())),
            Err(_) => {
                return Err(SearchError::Location(format!(
                    "no position within {}s",
                    timeout.as_secs()
                )))
            }
        };
        let bounds = bounds_from_point(point.lat, point.lng, self.settings.point_delta)
            .ok_or_else(|| {
                SearchError::Location("position is not a finite coordinate".to_string())
            })?;

        let mut filter = self.base_filter();
        filter.bounds = Some(bounds);
        let (place, items) = join(
            self.catalog.reverse_geocode(point),
            self.catalog.search_products(&filter),
        )
        .await;

        let place = place
            .inspect_err(|e| {
                tracing::warn!(error = %e, "reverse geocoding failed, using generic label");
            })
            .ok();
        let mut items = items?;
        tracing::debug!(tier = "bbox", count = items.len(), "gps search tier");

        let city = place.as_ref().and_then(Place::city).map(str::to_string);
        let country = place.as_ref().and_then(Place::country_code);

        if items.is_empty() {
            if let Some(city) = &city {
                let mut filter = self.base_filter();
                filter.city = Some(city.clone());
                filter.country.clone_from(&country);
                items = self.catalog.search_products(&filter).await?;
                tracing::debug!(tier = "city", count = items.len(), "gps search tier");
            }
        }

        let label = city
            .as_deref()
            .map_or_else(|| NEAR_YOU_LABEL.to_string(), |c| format!("Perto de {c}"));
        if items.is_empty() {
            return Err(SearchError::NoResults(label));
        }

        Ok(ReconciledResult::new(items, label)
            .with_country(country)
            .with_city(city)
            .with_area(Some(point), Some(bounds)))
    }
}
