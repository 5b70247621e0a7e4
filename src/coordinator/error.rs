use thiserror::Error;

/// Errors raised when starting a coordinator.
///
/// Once started, a coordinator never fails; provider failures are only
/// logged and counted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("Page size must be at least 1")]
    InvalidPageSize,

    #[error("Page {page} is out of range for page size {page_size}")]
    PageOutOfRange { page: u64, page_size: u64 },

    #[error("Coordinator must be started from within a Tokio runtime")]
    NoRuntime,
}
