//! Page arithmetic derived from a loaded page.

/// Position of the current page within the whole result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total_count: u64,
    page_size: u64,
    page: u64,
}

impl Pagination {
    /// `None` when there is nothing to paginate (no items or zero page size).
    pub fn new(total_count: u64, page_size: u64, page: u64) -> Option<Self> {
        if total_count == 0 || page_size == 0 {
            return None;
        }
        Some(Self {
            total_count,
            page_size,
            page,
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.page_size)
    }

    /// One-based index of the first item on this page.
    pub fn first_item(&self) -> u64 {
        self.page.saturating_mul(self.page_size).saturating_add(1)
    }

    /// One-based index of the last item on this page.
    pub fn last_item(&self) -> u64 {
        self.page
            .saturating_mul(self.page_size)
            .saturating_add(self.page_size)
            .min(self.total_count)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    pub fn previous(&self) -> Option<u64> {
        self.has_previous().then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u64> {
        self.has_next().then(|| self.page + 1)
    }

    /// Whether `page` is a valid zero-based page index.
    pub fn contains(&self, page: u64) -> bool {
        page < self.total_pages()
    }

    /// e.g. `"5-8 of 9 items"`
    pub fn info_label(&self) -> String {
        let noun = if self.total_count == 1 { "item" } else { "items" };
        format!(
            "{}-{} of {} {}",
            self.first_item(),
            self.last_item(),
            self.total_count,
            noun
        )
    }

    /// e.g. `"Page number 2, of 3 pages"`
    pub fn page_label(&self) -> String {
        let total_pages = self.total_pages();
        let suffix = if total_pages == 1 { "" } else { " pages" };
        format!(
            "Page number {}, of {}{}",
            self.page.saturating_add(1),
            total_pages,
            suffix
        )
    }
}
