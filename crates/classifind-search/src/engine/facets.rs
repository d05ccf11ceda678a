use classifind_catalog::{CatalogService, CountryCount};

use super::SearchEngine;
use crate::error::SearchError;
use crate::types::{GeoScope, ReconciledResult, SearchKind};

impl<C: CatalogService> SearchEngine<C> {
    /// All listings in one country, given as a two-letter code in any case.
    ///
    /// An empty country is reported as [`SearchError::NoResults`], leaving
    /// whatever the caller displays untouched.
    pub async fn run_country_filter(&self, code: &str) -> Result<ReconciledResult, SearchError> {
        self.tracked(SearchKind::Country, self.country_query(code))
            .await
    }

    async fn country_query(&self, code: &str) -> Result<ReconciledResult, SearchError> {
        let scope = GeoScope::country(code)
            .ok_or_else(|| SearchError::Input(format!("invalid country code {code:?}")))?;
        let label = scope.label();

        let items = self
            .catalog
            .search_products(&self.scoped_filter(&scope, None))
            .await?;
        if items.is_empty() {
            return Err(SearchError::NoResults(label));
        }

        Ok(ReconciledResult::new(items, label)
            .with_country(scope.country_code().map(str::to_string)))
    }

    /// All listings in one category, optionally within a scope.
    pub async fn run_category_filter(
        &self,
        category: &str,
        scope: Option<GeoScope>,
    ) -> Result<ReconciledResult, SearchError> {
        self.tracked(SearchKind::Category, self.category_query(category, scope))
            .await
    }

    async fn category_query(
        &self,
        category: &str,
        scope: Option<GeoScope>,
    ) -> Result<ReconciledResult, SearchError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(SearchError::Input("empty category".to_string()));
        }
        let label = format!("Categoria: {category}");

        let filter = match &scope {
            Some(scope) => {
                scope.validate()?;
                self.scoped_filter(scope, Some(category))
            }
            None => {
                let mut filter = self.base_filter();
                filter.category = Some(category.to_string());
                filter
            }
        };
        let items = self.catalog.search_products(&filter).await?;
        if items.is_empty() {
            return Err(SearchError::NoResults(label));
        }

        Ok(ReconciledResult::new(items, label)
            .with_country(
                scope
                    .as_ref()
                    .and_then(GeoScope::country_code)
                    .map(str::to_string),
            )
            .with_area(None, scope.as_ref().and_then(GeoScope::bounds)))
    }

    /// Countries that currently have listings, busiest first.
    pub async fn list_countries(&self) -> Result<Vec<CountryCount>, SearchError> {
        let mut countries: Vec<CountryCount> = self
            .catalog
            .list_active_countries()
            .await?
            .into_iter()
            .filter(|c| c.total > 0)
            .collect();
        countries.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.country.cmp(&b.country))
        });
        Ok(countries)
    }
}
