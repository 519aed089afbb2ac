//! The five multi-valued columns and how their cells are split.

use data_loader::Movie;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator the export uses to join names inside one cell
pub const SEPARATOR: &str = ", ";

/// A column holding a delimiter-joined list of names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiValuedField {
    Genres,
    Keywords,
    SpokenLanguages,
    ProductionCompanies,
    ProductionCountries,
}

impl MultiValuedField {
    pub const ALL: [MultiValuedField; 5] = [
        MultiValuedField::Genres,
        MultiValuedField::Keywords,
        MultiValuedField::SpokenLanguages,
        MultiValuedField::ProductionCompanies,
        MultiValuedField::ProductionCountries,
    ];

    /// Column name in the CSV and field name in the documents
    pub fn column(self) -> &'static str {
        match self {
            MultiValuedField::Genres => "genres",
            MultiValuedField::Keywords => "keywords",
            MultiValuedField::SpokenLanguages => "spoken_languages",
            MultiValuedField::ProductionCompanies => "production_companies",
            MultiValuedField::ProductionCountries => "production_countries",
        }
    }

    /// The raw, still joined cell of this column for one movie
    pub fn cell(self, movie: &Movie) -> Option<&str> {
        let cell = match self {
            MultiValuedField::Genres => &movie.genres,
            MultiValuedField::Keywords => &movie.keywords,
            MultiValuedField::SpokenLanguages => &movie.spoken_languages,
            MultiValuedField::ProductionCompanies => &movie.production_companies,
            MultiValuedField::ProductionCountries => &movie.production_countries,
        };
        cell.as_deref()
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MultiValuedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Split a joined cell into trimmed names, in source order.
///
/// Empty segments are kept so the names always join back to the cell.
///
/// Example: "Action, Drama" -> ["Action", "Drama"]
pub fn split_names(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(SEPARATOR).map(str::trim)
}
