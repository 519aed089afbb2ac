//! The CleaningPipeline turns raw rows into cleaned movies.
//!
//! Row filters run first and decide which rows survive; the survivors are
//! then converted into `Movie`s (release date parsed, decade derived,
//! revenue already coerced to a float by the reader).

use crate::filters::{AdultFilter, DuplicateIdFilter, RequiredFieldsFilter};
use crate::traits::RowFilter;
use crate::types::{Movie, RawMovie};

/// Chains row filters together into a cleaning pass.
///
/// ## Usage
/// ```ignore
/// let mut cleaning = CleaningPipeline::new()
///     .add_filter(RequiredFieldsFilter::new(false))
///     .add_filter(AdultFilter)
///     .add_filter(DuplicateIdFilter::new());
///
/// let movies = cleaning.clean(raw_rows);
/// ```
pub struct CleaningPipeline {
    filters: Vec<Box<dyn RowFilter>>,
}

impl CleaningPipeline {
    /// Create a new empty CleaningPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The standard pass: required fields, then adult flag, then duplicate ids
    pub fn standard(require_imdb_id: bool) -> Self {
        Self::new()
            .add_filter(RequiredFieldsFilter::new(require_imdb_id))
            .add_filter(AdultFilter)
            .add_filter(DuplicateIdFilter::new())
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl RowFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence, then convert the survivors.
    ///
    /// Rows keep their source order.
    pub fn clean(&mut self, rows: Vec<RawMovie>) -> Vec<Movie> {
        let mut current = rows;
        for filter in &mut self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current.into_iter().filter_map(Movie::from_raw).collect()
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}
