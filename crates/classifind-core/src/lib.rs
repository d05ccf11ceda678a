//! Shared types for the classifind workspace: application configuration,
//! flat geo primitives, and the normalized catalog record every other crate
//! operates on.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{GeoBounds, GeoPoint};
pub use products::ProductRecord;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
