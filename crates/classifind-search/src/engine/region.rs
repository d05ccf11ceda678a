use classifind_catalog::{CatalogService, Place};
use classifind_core::{GeoBounds, ProductRecord};
use futures::future::join;

use super::SearchEngine;
use crate::error::SearchError;
use crate::key::key_of;
use crate::merge::merge;
use crate::types::{ReconciledResult, RegionResult, SearchKind, MAP_AREA_LABEL};

impl<C: CatalogService> SearchEngine<C> {
    /// Listings inside a map-drawn rectangle, topped up with listings from the
    /// country the rectangle's centre falls in.
    ///
    /// `priority_keys` of the result are the keys of the listings the
    /// rectangle itself returned.
    pub async fn run_region_search(&self, bounds: GeoBounds) -> Result<RegionResult, SearchError> {
        self.tracked(SearchKind::Region, self.region_cascade(bounds))
            .await
    }

    async fn region_cascade(&self, bounds: GeoBounds) -> Result<RegionResult, SearchError> {
        if !bounds.is_valid() {
            return Err(SearchError::Input(format!("invalid map bounds {bounds:?}")));
        }
        let centroid = bounds.centroid();

        let mut filter = self.base_filter();
        filter.bounds = Some(bounds);
        let (place, bbox_items) = join(
            self.catalog.reverse_geocode(centroid),
            self.catalog.search_products(&filter),
        )
        .await;

        let place = place
            .inspect_err(|e| tracing::warn!(error = %e, "reverse geocoding of map centre failed"))
            .ok();
        let bbox_items = bbox_items?;
        tracing::debug!(tier = "bbox", count = bbox_items.len(), "region search tier");

        let country = place.as_ref().and_then(Place::country_code);
        let city = place.as_ref().and_then(Place::city).map(str::to_string);
        let label = place
            .as_ref()
            .and_then(Place::label)
            .unwrap_or_else(|| MAP_AREA_LABEL.to_string());
        let priority_keys: Vec<String> = bbox_items.iter().filter_map(key_of).collect();

        let items = match &country {
            None => bbox_items,
            Some(code) => {
                let mut filter = self.base_filter();
                filter.country = Some(code.clone());
                match self.catalog.search_products(&filter).await {
                    Ok(country_items) => {
                        tracing::debug!(
                            tier = "country",
                            country = %code,
                            count = country_items.len(),
                            "region search tier"
                        );
                        reconcile_region(bbox_items, country_items)
                    }
                    Err(e) if bbox_items.is_empty() => return Err(e.into()),
                    Err(e) => {
                        tracing::warn!(
                            country = %code,
                            error = %e,
                            "country query failed, keeping map results"
                        );
                        bbox_items
                    }
                }
            }
        };

        if items.is_empty() {
            return Err(SearchError::NoResults(label));
        }

        Ok(RegionResult {
            result: ReconciledResult::new(items, label)
                .with_country(country)
                .with_city(city)
                .with_area(Some(centroid), Some(bounds)),
            priority_keys,
        })
    }
}

/// Combines the rectangle's listings with the country-level ones.
///
/// An empty rectangle is replaced by the country list. Otherwise only
/// country listings without coordinates are appended: located ones outside
/// the rectangle would contradict the map.
#[must_use]
pub fn reconcile_region(
    bbox_items: Vec<ProductRecord>,
    country_items: Vec<ProductRecord>,
) -> Vec<ProductRecord> {
    if bbox_items.is_empty() {
        return country_items;
    }
    let unlocated: Vec<ProductRecord> = country_items
        .into_iter()
        .filter(|r| !r.has_coordinates())
        .collect();
    merge([bbox_items, unlocated])
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rec(value: serde_json::Value) -> ProductRecord {
        ProductRecord::from_value(value).unwrap()
    }

    #[test]
    fn empty_box_takes_country_list() {
        let country = vec![
            rec(json!({ "id": 1, "lat": 1.0, "lng": 1.0 })),
            rec(json!({ "id": 2 })),
        ];
        assert_eq!(reconcile_region(Vec::new(), country.clone()), country);
    }

    #[test]
    fn non_empty_box_only_gains_unlocated_listings() {
        let bbox = vec![rec(json!({ "id": 1, "lat": 1.0, "lng": 1.0 }))];
        let country = vec![
            rec(json!({ "id": 1, "lat": 1.0, "lng": 1.0 })),
            rec(json!({ "id": 2, "lat": 9.0, "lng": 9.0 })),
            rec(json!({ "id": 3 })),
        ];
        let ids: Vec<_> = reconcile_region(bbox, country)
            .into_iter()
            .filter_map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
