//! Request coordinator.
//!
//! Owns the active [`Selection`] and the published [`ViewState`], issues a
//! provider fetch whenever the selection changes, and routes every response
//! through a [`LatestWins`] guard so only the newest fetch can update the
//! view.
//!
//! ```text
//! refine(q, p) ──→ ViewReducer ──→ LOADING ──→ provider.fetch_page(q, p * size, size)
//!                                                   │
//!                      READY ←── accepted ←── LatestWins ──→ discarded (logged)
//! ```

mod error;
mod stats;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::latest::{Discard, Generation, LatestWins};
use crate::model::PageResult;
use crate::provider::{DataProvider, ProviderError, ProviderFuture};
use crate::view::mvi::Reducer;
use crate::view::{Selection, ViewIntent, ViewReducer, ViewState};

pub use error::CoordinatorError;
pub use stats::FetchStats;

/// Page returned for the selection that requested it.
struct Fetched {
    selection: Selection,
    result: PageResult,
}

struct CoordinatorState {
    view: ViewState,
    stats: FetchStats,
    publisher: watch::Sender<ViewState>,
}

impl CoordinatorState {
    fn dispatch(&mut self, intent: ViewIntent) {
        self.view = ViewReducer::reduce(std::mem::take(&mut self.view), intent);
    }

    fn publish(&self) {
        self.publisher.send_replace(self.view.clone());
    }
}

/// Coordinates selection changes with provider fetches.
///
/// Cheap to clone; clones share the same state. Must be started inside a
/// Tokio runtime, fetches run as tasks on that runtime.
#[derive(Clone)]
pub struct RequestCoordinator {
    guard: LatestWins<CoordinatorState, Fetched, ProviderError>,
    provider: Arc<dyn DataProvider>,
    page_size: u64,
}

impl RequestCoordinator {
    /// Create a coordinator and immediately fetch the initial selection.
    ///
    /// # Errors
    /// Returns error if `page_size` is zero, if the initial page offset does
    /// not fit in a `u64`, or if called outside a Tokio runtime.
    pub fn start(
        provider: Arc<dyn DataProvider>,
        initial_query: impl Into<String>,
        page_size: u64,
        initial_page: u64,
    ) -> Result<Self, CoordinatorError> {
        if page_size == 0 {
            return Err(CoordinatorError::InvalidPageSize);
        }
        if initial_page.checked_mul(page_size).is_none() {
            return Err(CoordinatorError::PageOutOfRange {
                page: initial_page,
                page_size,
            });
        }
        let runtime = Handle::try_current().map_err(|_| CoordinatorError::NoRuntime)?;

        let initial = ViewState::new(Selection::new(initial_query, initial_page));
        let (publisher, _) = watch::channel(initial.clone());
        let state = CoordinatorState {
            view: initial,
            stats: FetchStats::default(),
            publisher,
        };

        let coordinator = Self {
            guard: LatestWins::new(runtime, state, apply_page, drop_response),
            provider,
            page_size,
        };
        coordinator.dispatch(ViewIntent::Load);

        Ok(coordinator)
    }

    /// Change the selection.
    ///
    /// A new query resets to page 0 (ignoring `page`); a new page on the same
    /// query loads that page; an identical selection does nothing. When the
    /// selection changes the view drops to loading before this returns. A
    /// page whose offset overflows `u64` is ignored.
    pub fn refine(&self, query: impl Into<String>, page: u64) {
        self.dispatch(ViewIntent::Refine {
            query: query.into(),
            page,
        });
    }

    /// Current view snapshot.
    pub fn observe(&self) -> ViewState {
        self.guard.with_state(|state| state.view.clone())
    }

    /// Receiver notified on every published view change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.guard.with_state(|state| state.publisher.subscribe())
    }

    pub fn stats(&self) -> FetchStats {
        self.guard.with_state(|state| state.stats)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    fn dispatch(&self, intent: ViewIntent) {
        let provider = &self.provider;
        let page_size = self.page_size;

        self.guard.submit_with(|state, generation| {
            let next = ViewReducer::reduce(state.view.clone(), intent);
            if next.selection == state.view.selection && next.phase == state.view.phase {
                tracing::trace!(
                    query = %next.selection.query,
                    page = next.selection.page,
                    "Selection unchanged, no fetch"
                );
                return None;
            }

            let Some(offset) = next.selection.offset(page_size) else {
                tracing::warn!(
                    query = %next.selection.query,
                    page = next.selection.page,
                    page_size,
                    "Page offset out of range, selection unchanged"
                );
                return None;
            };

            tracing::debug!(
                generation = %generation,
                query = %next.selection.query,
                page = next.selection.page,
                offset,
                limit = page_size,
                "Issuing fetch"
            );

            // Nothing is committed until the provider has handed back a future.
            let pending = start_fetch(provider.as_ref(), &next.selection.query, offset, page_size);

            let selection = next.selection.clone();
            state.view = next;
            state.stats.issued += 1;
            state.publish();

            Some(async move { pending.await.map(|result| Fetched { selection, result }) })
        });
    }
}

/// Call `fetch_page`, turning a panic in the provider into a failed fetch.
fn start_fetch(
    provider: &dyn DataProvider,
    query: &str,
    offset: u64,
    limit: u64,
) -> ProviderFuture {
    match panic::catch_unwind(AssertUnwindSafe(|| provider.fetch_page(query, offset, limit))) {
        Ok(pending) => pending,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(%query, offset, %message, "Provider panicked while starting fetch");
            Box::pin(async move { Err::<PageResult, _>(ProviderError::Panicked(message)) })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn apply_page(state: &mut CoordinatorState, generation: Generation, fetched: Fetched) {
    let Fetched { selection, result } = fetched;
    tracing::debug!(
        generation = %generation,
        query = %selection.query,
        page = selection.page,
        items = result.items.len(),
        total = result.total_count,
        "Applying page"
    );

    state.dispatch(ViewIntent::Loaded { selection, result });
    state.stats.applied += 1;
    state.publish();
}

fn drop_response(state: &mut CoordinatorState, discard: Discard<ProviderError>) {
    match discard {
        Discard::Superseded { generation, latest } => {
            state.stats.superseded += 1;
            tracing::debug!(
                generation = %generation,
                latest = %latest,
                "Discarding superseded response"
            );
        }
        Discard::Failed {
            generation,
            superseded: true,
            reason,
        } => {
            state.stats.failed_superseded += 1;
            tracing::debug!(
                generation = %generation,
                kind = reason.kind(),
                error = %reason,
                "Superseded fetch failed"
            );
        }
        Discard::Failed {
            generation,
            superseded: false,
            reason,
        } => {
            state.stats.failed += 1;
            tracing::warn!(
                generation = %generation,
                kind = reason.kind(),
                error = %reason,
                query = %state.view.selection.query,
                page = state.view.selection.page,
                "Fetch failed, view stays loading"
            );
        }
        Discard::Aborted {
            generation,
            superseded,
            reason,
        } => {
            if superseded {
                state.stats.failed_superseded += 1;
            } else {
                state.stats.failed += 1;
            }
            tracing::warn!(
                generation = %generation,
                superseded,
                error = %reason,
                "Fetch task aborted"
            );
        }
    }
}
