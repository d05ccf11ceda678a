use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so tests
/// can drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let catalog_base_url = require("CLASSIFIND_CATALOG_URL")?;
    let catalog_api_key = lookup("CLASSIFIND_CATALOG_API_KEY")
        .ok()
        .filter(|v| !v.is_empty());

    let env = parse_environment(&or_default("CLASSIFIND_ENV", "development"))?;
    let log_level = or_default("CLASSIFIND_LOG_LEVEL", "info");

    let http_timeout_secs = parse_u64("CLASSIFIND_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "CLASSIFIND_USER_AGENT",
        "classifind/0.1 (marketplace-search)",
    );
    let default_sort = or_default("CLASSIFIND_DEFAULT_SORT", "rank");

    let default_country = or_default("CLASSIFIND_DEFAULT_COUNTRY", "BR");
    if default_country.len() != 2 || !default_country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid(
            "CLASSIFIND_DEFAULT_COUNTRY",
            format!("expected an ISO alpha-2 code, got '{default_country}'"),
        ));
    }
    let default_country = default_country.to_ascii_uppercase();

    let few_results_threshold = parse_usize("CLASSIFIND_FEW_RESULTS_THRESHOLD", "6")?;

    let point_delta = or_default("CLASSIFIND_POINT_DELTA", "0.05")
        .parse::<f64>()
        .map_err(|e| invalid("CLASSIFIND_POINT_DELTA", e.to_string()))?;
    if !point_delta.is_finite() || point_delta <= 0.0 {
        return Err(invalid(
            "CLASSIFIND_POINT_DELTA",
            format!("must be a positive number of degrees, got {point_delta}"),
        ));
    }

    let gps_timeout_secs = parse_u64("CLASSIFIND_GPS_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        catalog_base_url,
        catalog_api_key,
        env,
        log_level,
        http_timeout_secs,
        user_agent,
        default_sort,
        default_country,
        few_results_threshold,
        point_delta,
        gps_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CLASSIFIND_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
