//! Shared query parameter types for API handlers.

use chrono::NaiveDate;
use onlycard_core::activity::day_bounds;
use onlycard_core::types::Timestamp;
use serde::Deserialize;

/// Dashboard date filter (`?date=YYYY-MM-DD`, UTC calendar day).
#[derive(Debug, Default, Deserialize)]
pub struct DateFilterParams {
    pub date: Option<NaiveDate>,
}

impl DateFilterParams {
    /// `[start, end)` of the requested day, if one was given.
    pub fn range(&self) -> Option<(Timestamp, Timestamp)> {
        self.date.map(day_bounds)
    }
}
