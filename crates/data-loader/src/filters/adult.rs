//! Filter to remove adult-flagged titles.

use crate::traits::RowFilter;
use crate::types::RawMovie;

/// Removes rows whose `adult` flag is set.
///
/// Rows without a flag are kept.
pub struct AdultFilter;

impl RowFilter for AdultFilter {
    fn name(&self) -> &str {
        "AdultFilter"
    }

    fn apply(&mut self, rows: Vec<RawMovie>) -> Vec<RawMovie> {
        rows.into_iter().filter(|row| !row.is_adult()).collect()
    }
}
