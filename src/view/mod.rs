//! View-facing state: selection, loading phase, loaded page and pagination.

pub mod mvi;
mod intent;
mod pagination;
mod reducer;
mod state;

pub use intent::ViewIntent;
pub use pagination::Pagination;
pub use reducer::ViewReducer;
pub use state::{Phase, Selection, ViewState};
