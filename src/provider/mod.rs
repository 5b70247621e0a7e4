//! Data providers: the collaborators that actually fetch pages.
//!
//! The coordinator depends only on [`DataProvider`]; the transport behind it
//! is opaque. Two implementations ship with the crate:
//!
//! - [`HttpProvider`]: JSON items endpoint over reqwest
//! - [`InMemoryProvider`]: local dataset, used for demo mode and tests

mod error;
mod http;
mod memory;

use std::future::Future;
use std::pin::Pin;

pub use error::ProviderError;
pub use http::HttpProvider;
pub use memory::InMemoryProvider;

use crate::model::PageResult;

/// Pending result of a single provider call.
pub type ProviderFuture =
    Pin<Box<dyn Future<Output = Result<PageResult, ProviderError>> + Send + 'static>>;

/// Source of result pages, addressed by query, offset and limit.
///
/// Each call must settle exactly once. Calls may overlap and may complete in
/// any order; implementations must be safe to call concurrently.
///
/// `fetch_page` is invoked while the coordinator holds its lock, so it
/// should only build the future; the request itself belongs inside it.
pub trait DataProvider: Send + Sync {
    fn fetch_page(&self, query: &str, offset: u64, limit: u64) -> ProviderFuture;
}
