//! Filter to drop rows that cannot become a document.

use crate::traits::RowFilter;
use crate::types::RawMovie;

/// Removes rows missing id, title, release date, overview or runtime.
///
/// In strict mode a well-formed IMDB id is required as well.
pub struct RequiredFieldsFilter {
    require_imdb_id: bool,
}

impl RequiredFieldsFilter {
    /// Create a new RequiredFieldsFilter.
    ///
    /// # Arguments
    /// * `require_imdb_id` - Also drop rows without a valid `tt...` IMDB id
    pub fn new(require_imdb_id: bool) -> Self {
        Self { require_imdb_id }
    }
}

impl RowFilter for RequiredFieldsFilter {
    fn name(&self) -> &str {
        "RequiredFieldsFilter"
    }

    fn apply(&mut self, rows: Vec<RawMovie>) -> Vec<RawMovie> {
        rows.into_iter()
            .filter(|row| row.has_required_fields())
            .filter(|row| !self.require_imdb_id || row.has_valid_imdb_id())
            .collect()
    }
}
