//! Search and geo-scoped result reconciliation for the marketplace.
//!
//! The pure building blocks ([`normalize`], [`fuzzy`], [`key`], [`merge`],
//! [`geo`]) never fail. [`SearchEngine`] strings them together with calls to
//! a [`classifind_catalog::CatalogService`] into the text, address, GPS,
//! map-region, and facet searches.

pub mod engine;
pub mod error;
pub mod events;
pub mod fuzzy;
pub mod geo;
pub mod guard;
pub mod key;
pub mod location;
pub mod merge;
pub mod normalize;
pub mod types;

pub use engine::{reconcile_region, SearchEngine};
pub use error::SearchError;
pub use events::SearchEvent;
pub use geo::{bounds_from_point, bounds_from_viewport, parse_bbox, MapViewport};
pub use key::key_of;
pub use location::{DeviceLocator, FixedLocator, LocationError};
pub use merge::{merge, merge_into_current, prioritize};
pub use types::{
    GeoScope, ReconciledResult, RegionResult, SearchKind, SearchRequest, SearchSettings,
};
