use crate::model::PageResult;
use crate::view::mvi::UiState;
use crate::view::pagination::Pagination;

/// What the user currently asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub query: String,
    /// Zero-based page index.
    pub page: u64,
}

impl Selection {
    pub fn new(query: impl Into<String>, page: u64) -> Self {
        Self {
            query: query.into(),
            page,
        }
    }

    /// Offset of the first item of this page, `None` if it overflows `u64`.
    pub fn offset(&self, page_size: u64) -> Option<u64> {
        self.page.checked_mul(page_size)
    }
}

/// Loading lifecycle of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Constructed, no fetch issued yet.
    #[default]
    Initializing,
    /// A fetch for the current selection is outstanding.
    Loading,
    /// `result` holds the page for the current selection.
    Ready,
}

/// Snapshot published to the view.
///
/// `result` is `None` while loading. When present it always belongs to
/// `selection`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub selection: Selection,
    pub result: Option<PageResult>,
    pub phase: Phase,
}

impl UiState for ViewState {}

impl ViewState {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            result: None,
            phase: Phase::Initializing,
        }
    }

    pub(crate) fn loading(selection: Selection) -> Self {
        Self {
            selection,
            result: None,
            phase: Phase::Loading,
        }
    }

    pub fn query(&self) -> &str {
        &self.selection.query
    }

    pub fn page(&self) -> u64 {
        self.selection.page
    }

    pub fn is_loading(&self) -> bool {
        self.result.is_none()
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Pagination for the loaded page, `None` while loading or when empty.
    pub fn pagination(&self, page_size: u64) -> Option<Pagination> {
        let result = self.result.as_ref()?;
        Pagination::new(result.total_count, page_size, self.selection.page)
    }
}
