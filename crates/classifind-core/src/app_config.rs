#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the catalog/geocoding service, e.g. `"https://api.example.com/v1"`.
    pub catalog_base_url: String,
    /// Sent as the `x-api-key` header when set.
    pub catalog_api_key: Option<String>,
    pub env: Environment,
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// Value sent as the `sort` query parameter on product searches.
    pub default_sort: String,
    /// ISO alpha-2 code used when a caller does not name a scope.
    pub default_country: String,
    /// Candidate lists shorter than this trigger the supplementary broad
    /// fallback during text search.
    pub few_results_threshold: usize,
    /// Half-side, in degrees, of the square built around a geocoded point.
    pub point_delta: f64,
    pub gps_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("catalog_base_url", &self.catalog_base_url)
            .field(
                "catalog_api_key",
                &self.catalog_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("default_sort", &self.default_sort)
            .field("default_country", &self.default_country)
            .field("few_results_threshold", &self.few_results_threshold)
            .field("point_delta", &self.point_delta)
            .field("gps_timeout_secs", &self.gps_timeout_secs)
            .finish()
    }
}
