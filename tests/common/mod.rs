//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use itemgrid::coordinator::RequestCoordinator;
use itemgrid::model::{Item, PageResult};
use itemgrid::provider::{DataProvider, ProviderError, ProviderFuture};
use itemgrid::view::ViewState;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::oneshot;

/// Arguments of one recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub query: String,
    pub offset: u64,
    pub limit: u64,
}

type Responder = oneshot::Sender<Result<PageResult, ProviderError>>;

/// Provider whose calls stay pending until the test resolves them.
///
/// Calls are numbered in issue order starting from 0, so tests can settle
/// them in any order they like.
#[derive(Default)]
pub struct ScriptedProvider {
    calls: Mutex<Vec<Call>>,
    responders: Mutex<Vec<Option<Responder>>>,
    panic_next: AtomicBool,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next `fetch_page` call panic instead of returning a future.
    ///
    /// The panicking call is not recorded and gets no index.
    pub fn panic_on_next_call(&self) {
        self.panic_next.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Complete call `index` with a page.
    pub fn succeed(&self, index: usize, result: PageResult) {
        self.settle(index, Ok(result));
    }

    /// Complete call `index` with an error.
    pub fn fail(&self, index: usize, error: ProviderError) {
        self.settle(index, Err(error));
    }

    fn settle(&self, index: usize, outcome: Result<PageResult, ProviderError>) {
        let responder = self.responders.lock()[index]
            .take()
            .expect("call already settled");
        let _ = responder.send(outcome);
    }
}

impl DataProvider for ScriptedProvider {
    fn fetch_page(&self, query: &str, offset: u64, limit: u64) -> ProviderFuture {
        if self.panic_next.swap(false, Ordering::SeqCst) {
            panic!("scripted provider refused {:?}", query);
        }

        let (tx, rx) = oneshot::channel();
        self.calls.lock().push(Call {
            query: query.to_string(),
            offset,
            limit,
        });
        self.responders.lock().push(Some(tx));

        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err(ProviderError::Unavailable("responder dropped".into())))
        })
    }
}

/// A page of `count` items tagged with `tag`.
pub fn tagged_page(tag: &str, count: usize, total: u64) -> PageResult {
    let items = (1..=count)
        .map(|n| {
            Item::new(
                format!("{} {}", tag, n),
                format!("{} description {}", tag, n),
                format!("https://example.com/{}/{}", tag, n),
            )
        })
        .collect();
    PageResult::new(items, total)
}

/// Wait until the coordinator has settled `count` fetches.
pub async fn wait_settled(coordinator: &RequestCoordinator, count: u64) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while coordinator.stats().settled() < count {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("fetches did not settle in time");
}

/// Wait until the published view satisfies `predicate`.
pub async fn wait_view(
    coordinator: &RequestCoordinator,
    predicate: impl FnMut(&ViewState) -> bool,
) -> ViewState {
    let mut rx = coordinator.subscribe();
    let view = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(predicate))
        .await
        .expect("view did not reach expected state in time")
        .expect("coordinator dropped")
        .clone();
    view
}

/// Write `content` to a config file inside a fresh temp directory.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
