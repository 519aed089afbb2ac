//! Core row types for the TMDB movie dataset.
//!
//! Two shapes of the same record live here:
//! - `RawMovie`: one CSV line exactly as the export has it, every column optional
//! - `Movie`: a cleaned row whose required columns are guaranteed present

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::parser;

// =============================================================================
// Type Aliases
// =============================================================================

/// TMDB identifier of a movie, the primary key of every emitted document
pub type MovieId = i64;

// =============================================================================
// Raw rows
// =============================================================================

/// One line of `TMDB_movie_dataset.csv`.
///
/// Columns are matched by header name, so column order in the export does
/// not matter and unknown columns are ignored. Numeric cells that fail to
/// parse become `None` rather than rejecting the whole line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMovie {
    #[serde(deserialize_with = "csv::invalid_option")]
    pub id: Option<MovieId>,
    pub title: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub vote_average: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub vote_count: Option<i64>,
    pub status: Option<String>,
    pub release_date: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub revenue: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub runtime: Option<i64>,
    #[serde(deserialize_with = "parser::deserialize_flag")]
    pub adult: Option<bool>,
    pub backdrop_path: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub budget: Option<i64>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub tagline: Option<String>,
    pub genres: Option<String>,
    pub production_companies: Option<String>,
    pub production_countries: Option<String>,
    pub spoken_languages: Option<String>,
    pub keywords: Option<String>,
}

impl RawMovie {
    /// True when every column a document cannot do without is present
    pub fn has_required_fields(&self) -> bool {
        self.id.is_some()
            && self.title.is_some()
            && self.release_date.is_some()
            && self.overview.is_some()
            && self.runtime.is_some()
    }

    /// True when the row carries a well-formed IMDB id (`tt` + digits)
    pub fn has_valid_imdb_id(&self) -> bool {
        self.imdb_id.as_deref().is_some_and(parser::is_valid_imdb_id)
    }

    /// Missing flags count as "not adult"
    pub fn is_adult(&self) -> bool {
        self.adult.unwrap_or(false)
    }
}

// =============================================================================
// Cleaned rows
// =============================================================================

/// A row that survived cleaning.
///
/// Required columns are plain values; everything else stays optional so a
/// missing source cell can be written out as an explicit null later on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub status: Option<String>,
    /// `None` when the source string could not be parsed as a date
    pub release_date: Option<NaiveDate>,
    /// Release year rounded down to the nearest ten
    pub decade: Option<i32>,
    pub revenue: Option<f64>,
    pub runtime: i64,
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub budget: Option<i64>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub overview: String,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub tagline: Option<String>,
    // Multi-valued columns, still joined by ", "
    pub genres: Option<String>,
    pub production_companies: Option<String>,
    pub production_countries: Option<String>,
    pub spoken_languages: Option<String>,
    pub keywords: Option<String>,
}

impl Movie {
    /// Build a cleaned row from a raw one.
    ///
    /// Returns `None` if a required column is missing. An unparseable
    /// release date does not reject the row: the date and decade are
    /// simply absent.
    pub fn from_raw(raw: RawMovie) -> Option<Self> {
        let release_date = parser::parse_release_date(raw.release_date.as_deref()?);

        Some(Self {
            id: raw.id?,
            title: raw.title?,
            vote_average: raw.vote_average,
            vote_count: raw.vote_count,
            status: raw.status,
            decade: release_date.map(|date| decade_of(date.year())),
            release_date,
            revenue: raw.revenue,
            runtime: raw.runtime?,
            adult: raw.adult.unwrap_or(false),
            backdrop_path: raw.backdrop_path,
            budget: raw.budget,
            homepage: raw.homepage,
            imdb_id: raw.imdb_id,
            original_language: raw.original_language,
            original_title: raw.original_title,
            overview: raw.overview?,
            popularity: raw.popularity,
            poster_path: raw.poster_path,
            tagline: raw.tagline,
            genres: raw.genres,
            production_companies: raw.production_companies,
            production_countries: raw.production_countries,
            spoken_languages: raw.spoken_languages,
            keywords: raw.keywords,
        })
    }
}

/// Round a year down to its decade: 1994 -> 1990
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

#[cfg(test)]
pub(crate) fn sample_raw(id: MovieId) -> RawMovie {
    RawMovie {
        id: Some(id),
        title: Some("A".to_string()),
        release_date: Some("1994-05-01".to_string()),
        overview: Some("x".to_string()),
        runtime: Some(90),
        adult: Some(false),
        genres: Some("Action, Drama".to_string()),
        ..RawMovie::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_of() {
        assert_eq!(decade_of(1994), 1990);
        assert_eq!(decade_of(2000), 2000);
        assert_eq!(decade_of(2009), 2000);
    }

    #[test]
    fn test_from_raw_derives_date_and_decade() {
        let movie = Movie::from_raw(sample_raw(5)).unwrap();

        assert_eq!(movie.id, 5);
        assert_eq!(movie.release_date, NaiveDate::from_ymd_opt(1994, 5, 1));
        assert_eq!(movie.decade, Some(1990));
        assert_eq!(movie.genres.as_deref(), Some("Action, Drama"));
    }

    #[test]
    fn test_from_raw_keeps_row_with_bad_date() {
        let raw = RawMovie {
            release_date: Some("someday".to_string()),
            ..sample_raw(7)
        };
        let movie = Movie::from_raw(raw).unwrap();

        assert_eq!(movie.release_date, None);
        assert_eq!(movie.decade, None);
    }

    #[test]
    fn test_from_raw_rejects_missing_required() {
        let raw = RawMovie {
            overview: None,
            ..sample_raw(8)
        };
        assert!(!raw.has_required_fields());
        assert!(Movie::from_raw(raw).is_none());
    }

    #[test]
    fn test_imdb_id_validation() {
        let mut raw = sample_raw(9);
        assert!(!raw.has_valid_imdb_id());

        raw.imdb_id = Some("tt0111161".to_string());
        assert!(raw.has_valid_imdb_id());

        raw.imdb_id = Some("nm0000151".to_string());
        assert!(!raw.has_valid_imdb_id());
    }
}
