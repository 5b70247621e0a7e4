/// Counters describing what happened to issued fetches.
///
/// Every settled fetch increments exactly one of `applied`, `superseded`,
/// `failed` or `failed_superseded`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Fetches sent to the provider.
    pub issued: u64,
    /// Responses applied to the view.
    pub applied: u64,
    /// Successful responses dropped because a newer fetch existed.
    pub superseded: u64,
    /// Failures of the latest fetch (the view stays loading).
    pub failed: u64,
    /// Failures of fetches that were already superseded.
    pub failed_superseded: u64,
}

impl FetchStats {
    pub fn settled(&self) -> u64 {
        self.applied + self.superseded + self.failed + self.failed_superseded
    }

    /// Fetches that have not settled yet.
    pub fn in_flight(&self) -> u64 {
        self.issued.saturating_sub(self.settled())
    }
}
