//! Filter to drop repeated identifiers.

use crate::traits::RowFilter;
use crate::types::{MovieId, RawMovie};
use std::collections::HashSet;

/// Keeps the first row for every id and drops later repeats.
///
/// The set of seen ids lives as long as the filter, so duplicates are
/// caught across chunk boundaries too.
#[derive(Default)]
pub struct DuplicateIdFilter {
    seen: HashSet<MovieId>,
}

impl DuplicateIdFilter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowFilter for DuplicateIdFilter {
    fn name(&self) -> &str {
        "DuplicateIdFilter"
    }

    fn apply(&mut self, rows: Vec<RawMovie>) -> Vec<RawMovie> {
        rows.into_iter()
            .filter(|row| match row.id {
                Some(id) => self.seen.insert(id),
                None => true,
            })
            .collect()
    }
}
