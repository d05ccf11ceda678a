use thiserror::Error;

/// Errors returned by the catalog service client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TLS failure, or a non-2xx status, from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with `"success": false`.
    #[error("catalog API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The client was constructed with an unusable base URL or header value.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}
