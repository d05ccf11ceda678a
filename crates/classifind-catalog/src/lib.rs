//! Client for the marketplace catalog and geocoding service.
//!
//! [`CatalogClient`] speaks the service's JSON envelope protocol over HTTP;
//! [`CatalogService`] is the seam the search engine is written against so it
//! can run on any implementation of the four remote operations.

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use service::CatalogService;
pub use types::{CountryCount, Place, ProductFilter};
