//! Failure reasons reported by data providers.

use thiserror::Error;

/// Errors a [`DataProvider`](super::DataProvider) may settle with.
///
/// The coordinator never inspects the variant; it only logs the failure and
/// leaves the view in its loading state.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Failed to reach the remote source
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Remote source answered with a non-success status
    #[error("Upstream error: {status} - {message}")]
    Upstream { status: u16, message: String },

    /// Response body was not a valid page
    #[error("Failed to decode page: {0}")]
    Decode(#[from] serde_json::Error),

    /// Provider cannot serve the request for any other reason.
    ///
    /// None of the bundled providers produce this; it is the catch-all for
    /// custom [`DataProvider`](crate::provider::DataProvider) implementations
    /// (offline caches, closed channels, and the like).
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// `fetch_page` panicked before returning a future
    #[error("Provider panicked: {0}")]
    Panicked(String),
}

impl ProviderError {
    /// Short machine-friendly tag, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Client(_) => "client_error",
            ProviderError::Connection { .. } => "connection_error",
            ProviderError::Timeout { .. } => "timeout",
            ProviderError::Upstream { .. } => "upstream_error",
            ProviderError::Decode(_) => "decode_error",
            ProviderError::Unavailable(_) => "unavailable",
            ProviderError::Panicked(_) => "provider_panic",
        }
    }
}
