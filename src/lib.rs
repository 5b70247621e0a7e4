//! Search-and-paginate client over a remote item collection.
//!
//! The interesting part is [`coordinator::RequestCoordinator`]: it owns the
//! current query/page selection, fetches pages through a
//! [`provider::DataProvider`], and guarantees that only the response of the
//! most recently issued fetch ever reaches the view, whatever order the
//! responses arrive in.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod latest;
pub mod logging;
pub mod model;
pub mod provider;
pub mod view;
