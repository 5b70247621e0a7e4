use std::sync::Arc;
use std::time::Duration;

use crate::model::{Item, PageResult};
use crate::provider::{DataProvider, ProviderFuture};

/// Serves pages from a dataset held in memory.
///
/// Matching is a case-insensitive substring test on title and description;
/// an empty query matches everything.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    items: Arc<Vec<Item>>,
    latency: Duration,
}

impl InMemoryProvider {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: Arc::new(items),
            latency: Duration::ZERO,
        }
    }

    /// Dataset of `count` items titled `Item: 1` .. `Item: {count}`.
    pub fn numbered(count: u64) -> Self {
        let items = (1..=count)
            .map(|n| {
                Item::new(
                    format!("Item: {}", n),
                    format!("Item no. {} description", n),
                    format!("https://example.com/{}", n),
                )
            })
            .collect();
        Self::new(items)
    }

    /// Delay every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Compute the page synchronously.
    pub fn page(&self, query: &str, offset: u64, limit: u64) -> PageResult {
        let needle = query.to_lowercase();
        let matching: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| {
                needle.is_empty()
                    || item.title.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            })
            .collect();

        let total_count = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        PageResult::new(items, total_count)
    }
}

impl DataProvider for InMemoryProvider {
    fn fetch_page(&self, query: &str, offset: u64, limit: u64) -> ProviderFuture {
        let provider = self.clone();
        let query = query.to_string();

        Box::pin(async move {
            if !provider.latency.is_zero() {
                tokio::time::sleep(provider.latency).await;
            }
            Ok(provider.page(&query, offset, limit))
        })
    }
}
