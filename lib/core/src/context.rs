use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Request-scoped evaluation context.
///
/// Carries the reference date every date-relative metric is computed against,
/// so a scoring run never reaches for the wall clock on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringContext {
    pub today: NaiveDate,
}

impl ScoringContext {
    #[inline]
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context pinned to the local calendar date.
    #[must_use]
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Whole days from `date` to `today` (negative when `date` is in the future).
    #[inline]
    pub fn days_since(&self, date: NaiveDate) -> i64 {
        (self.today - date).num_days()
    }
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self::now()
    }
}
