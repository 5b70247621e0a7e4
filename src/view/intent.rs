use crate::model::PageResult;
use crate::view::mvi::Intent;
use crate::view::state::Selection;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewIntent {
    /// Start fetching the current selection.
    Load,
    /// User edited the query or picked a page.
    Refine { query: String, page: u64 },
    /// A page was accepted for `selection`.
    Loaded {
        selection: Selection,
        result: PageResult,
    },
}

impl Intent for ViewIntent {}
