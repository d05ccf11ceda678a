use classifind_catalog::CatalogService;

use super::SearchEngine;
use crate::error::SearchError;
use crate::fuzzy::filter_matching;
use crate::merge::merge;
use crate::normalize::tokenize;
use crate::types::{GeoScope, ReconciledResult, SearchKind, SearchRequest};

impl<C: CatalogService> SearchEngine<C> {
    /// Free-text search within `scope`.
    pub async fn run_text_search(
        &self,
        text: &str,
        scope: GeoScope,
    ) -> Result<ReconciledResult, SearchError> {
        self.run_search(SearchRequest {
            text: Some(text.to_string()),
            scope,
            category: None,
        })
        .await
    }

    /// Free-text search with an optional category constraint.
    ///
    /// The server-side query runs first and its hits are narrowed with the
    /// local fuzzy matcher. When that yields nothing, or fewer than
    /// `few_results_threshold` listings, the same scope is queried without
    /// text and fuzzy-filtered locally to fill the list.
    pub async fn run_search(
        &self,
        request: SearchRequest,
    ) -> Result<ReconciledResult, SearchError> {
        self.tracked(SearchKind::Text, self.text_cascade(request)).await
    }

    async fn text_cascade(
        &self,
        request: SearchRequest,
    ) -> Result<ReconciledResult, SearchError> {
        request.scope.validate()?;
        let text = request.text.as_deref().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(SearchError::Input("empty search text".to_string()));
        }
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Err(SearchError::Input(format!(
                "search text {text:?} has no searchable words"
            )));
        }

        let category = request
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        let label = request.scope.label();

        let mut primary_filter = self.scoped_filter(&request.scope, category);
        primary_filter.text = Some(text.to_string());
        let primary = self.catalog.search_products(&primary_filter).await?;
        tracing::debug!(
            tier = "primary",
            count = primary.len(),
            scope = %label,
            "text search tier"
        );

        let candidate = if primary.is_empty() {
            primary
        } else {
            let matched = filter_matching(&primary, &tokens);
            if matched.is_empty() {
                primary
            } else {
                matched
            }
        };

        let broad_filter = self.scoped_filter(&request.scope, category);
        let items = if candidate.is_empty() {
            let broad = self.catalog.search_products(&broad_filter).await?;
            let matched = filter_matching(&broad, &tokens);
            tracing::debug!(
                tier = "fallback",
                fetched = broad.len(),
                count = matched.len(),
                "text search tier"
            );
            matched
        } else if candidate.len() < self.settings.few_results_threshold {
            match self.catalog.search_products(&broad_filter).await {
                Ok(broad) => {
                    let matched = filter_matching(&broad, &tokens);
                    tracing::debug!(
                        tier = "supplement",
                        fetched = broad.len(),
                        count = matched.len(),
                        "text search tier"
                    );
                    merge([candidate, matched])
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "supplementary text query failed, keeping primary results"
                    );
                    candidate
                }
            }
        } else {
            candidate
        };

        if items.is_empty() {
            return Err(SearchError::NoResults(label));
        }

        Ok(ReconciledResult::new(items, label)
            .with_country(request.scope.country_code().map(str::to_string))
            .with_area(None, request.scope.bounds()))
    }
}
