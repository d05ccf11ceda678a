//! Query reconciliation: the tiered remote lookups behind every discovery
//! path, folded into one deduplicated result list.

mod address;
mod facets;
mod gps;
mod region;
mod text;

use std::future::Future;

use classifind_catalog::{CatalogService, ProductFilter};
use tokio::sync::broadcast;

use crate::error::SearchError;
use crate::events::SearchEvent;
use crate::guard::GenerationGuard;
use crate::types::{GeoScope, ReconciledResult, RegionResult, SearchKind, SearchSettings};

pub use region::reconcile_region;

const EVENT_CAPACITY: usize = 64;

/// Runs searches against a catalog and publishes their lifecycle.
///
/// An engine drives a single result display: starting an operation makes
/// every operation still in flight stale, and a stale operation resolves to
/// [`SearchError::Superseded`] instead of its result.
pub struct SearchEngine<C> {
    catalog: C,
    settings: SearchSettings,
    guard: GenerationGuard,
    events: broadcast::Sender<SearchEvent>,
}

impl<C: CatalogService> SearchEngine<C> {
    #[must_use]
    pub fn new(catalog: C, settings: SearchSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            catalog,
            settings,
            guard: GenerationGuard::new(),
            events,
        }
    }

    /// Receives every [`SearchEvent`] emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.events.subscribe()
    }

    #[must_use]
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Filter carrying only the configured sort order.
    fn base_filter(&self) -> ProductFilter {
        ProductFilter {
            sort: self.settings.sort.clone(),
            ..ProductFilter::default()
        }
    }

    fn scoped_filter(&self, scope: &GeoScope, category: Option<&str>) -> ProductFilter {
        let mut filter = self.base_filter();
        scope.apply(&mut filter);
        filter.category = category.map(str::to_string);
        filter
    }

    fn emit(&self, event: SearchEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }

    /// Wraps one operation with a generation ticket, lifecycle events, and
    /// outcome logging.
    async fn tracked<T, F>(&self, kind: SearchKind, operation: F) -> Result<T, SearchError>
    where
        T: Outcome,
        F: Future<Output = Result<T, SearchError>>,
    {
        let generation = self.guard.begin();
        tracing::debug!(%kind, generation, "search started");
        self.emit(SearchEvent::Started { generation, kind });

        let outcome = operation.await;

        if !self.guard.is_current(generation) {
            tracing::info!(%kind, generation, "discarding superseded search result");
            self.emit(SearchEvent::Discarded { generation, kind });
            return Err(SearchError::Superseded);
        }

        match &outcome {
            Ok(result) => {
                tracing::info!(
                    %kind,
                    generation,
                    count = result.count(),
                    label = result.label(),
                    "search completed"
                );
                self.emit(SearchEvent::Completed {
                    generation,
                    kind,
                    label: result.label().to_string(),
                    count: result.count(),
                });
            }
            Err(SearchError::NoResults(label)) => {
                tracing::info!(%kind, generation, label = %label, "search found nothing");
                self.emit(SearchEvent::Empty {
                    generation,
                    kind,
                    label: label.clone(),
                });
            }
            Err(e) => {
                tracing::warn!(%kind, generation, error = %e, "search failed");
                self.emit(SearchEvent::Failed {
                    generation,
                    kind,
                    message: e.user_message(),
                });
            }
        }

        outcome
    }
}

/// Summary of a successful operation, for events and logs.
trait Outcome {
    fn label(&self) -> &str;
    fn count(&self) -> usize;
}

impl Outcome for ReconciledResult {
    fn label(&self) -> &str {
        &self.applied_label
    }

    fn count(&self) -> usize {
        self.items.len()
    }
}

impl Outcome for RegionResult {
    fn label(&self) -> &str {
        &self.result.applied_label
    }

    fn count(&self) -> usize {
        self.result.items.len()
    }
}
