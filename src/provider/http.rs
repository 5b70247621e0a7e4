use std::time::Duration;

use reqwest::Client;
use tokio::time::timeout;

use crate::config::ProviderConfig;
use crate::model::PageResult;
use crate::provider::{DataProvider, ProviderError, ProviderFuture};

/// Longest upstream error body kept in [`ProviderError::Upstream`].
const MAX_ERROR_MESSAGE: usize = 200;

/// Fetches pages from a JSON items endpoint.
///
/// Issues `GET {base_url}{items_path}?search=..&offset=..&limit=..` and
/// decodes `{"items": [...], "totalItems": n}`.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    endpoint: String,
    request_timeout: Duration,
}

impl HttpProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .map_err(ProviderError::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            request_timeout: Duration::from_secs(config.timeout_seconds.into()),
        })
    }

    /// Full URL requests are sent to, without the query string.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DataProvider for HttpProvider {
    fn fetch_page(&self, query: &str, offset: u64, limit: u64) -> ProviderFuture {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let request_timeout = self.request_timeout;
        let query = query.to_string();

        Box::pin(async move {
            match timeout(request_timeout, do_fetch(client, endpoint, query, offset, limit)).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout {
                    duration: request_timeout.as_secs(),
                }),
            }
        })
    }
}

async fn do_fetch(
    client: Client,
    endpoint: String,
    query: String,
    offset: u64,
    limit: u64,
) -> Result<PageResult, ProviderError> {
    tracing::debug!(%endpoint, %query, offset, limit, "Fetching page");

    let response = client
        .get(&endpoint)
        .query(&[("search", query.as_str())])
        .query(&[("offset", offset), ("limit", limit)])
        .send()
        .await
        .map_err(|e| ProviderError::Connection {
            url: endpoint.clone(),
            source: e,
        })?;

    let status = response.status();
    let body = response.bytes().await.map_err(|e| ProviderError::Connection {
        url: endpoint.clone(),
        source: e,
    })?;

    if !status.is_success() {
        return Err(ProviderError::Upstream {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Pull a readable message out of an error body.
///
/// Understands `{"error": "..."}` and `{"error": {"message": "..."}}`,
/// otherwise falls back to the (truncated) raw text.
fn error_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        let error = value.get("error");
        let message = error
            .and_then(|e| e.as_str())
            .or_else(|| error.and_then(|e| e.get("message")).and_then(|m| m.as_str()));
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(MAX_ERROR_MESSAGE) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
