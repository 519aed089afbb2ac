//! Core trait for the cleaning pipeline.
//!
//! Each cleaning step is a `RowFilter`; the `CleaningPipeline` runs them
//! in a fixed order over every chunk of raw rows.

use crate::types::RawMovie;

/// One row-level cleaning step.
///
/// ## Design Note
/// - `apply` takes `&mut self` so a filter can carry state from one chunk
///   to the next (the duplicate-id filter remembers every id it has seen)
/// - Filters take ownership of the rows and return the survivors in their
///   original order
pub trait RowFilter: Send {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep the rows that pass this step.
    fn apply(&mut self, rows: Vec<RawMovie>) -> Vec<RawMovie>;
}
