//! Cleaned row -> movie document.
//!
//! `Transformer::transform` is a pure function of the row and, in tagged
//! mode, the category tables. Nothing else is consulted.

use crate::categories::CategoryIndex;
use crate::document::{Category, CategoryEntry, MovieDocument};
use crate::error::{Result, TransformError};
use crate::fields::{split_names, MultiValuedField};
use data_loader::Movie;
use rayon::prelude::*;

/// How multi-valued entries are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    /// Bare name strings
    #[default]
    Names,
    /// `{id, name}` records looked up in the category tables
    Tagged,
}

/// Converts cleaned rows into documents.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    index: Option<&'a CategoryIndex>,
}

impl Transformer<'static> {
    /// Emit entries as bare names
    pub fn names() -> Self {
        Self { index: None }
    }
}

impl<'a> Transformer<'a> {
    /// Emit entries as `{id, name}` records from `index`
    pub fn tagged(index: &'a CategoryIndex) -> Self {
        Self { index: Some(index) }
    }

    /// Pick the transformer for `mode`; the index is only used when tagging
    pub fn for_mode(mode: EntryMode, index: &'a CategoryIndex) -> Self {
        match mode {
            EntryMode::Names => Self { index: None },
            EntryMode::Tagged => Self::tagged(index),
        }
    }

    pub fn mode(&self) -> EntryMode {
        match self.index {
            Some(_) => EntryMode::Tagged,
            None => EntryMode::Names,
        }
    }

    /// Transform one row
    pub fn transform(&self, movie: &Movie) -> Result<MovieDocument> {
        let mut document = MovieDocument {
            id: movie.id,
            title: movie.title.clone(),
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            status: movie.status.clone(),
            release_date: movie.release_date,
            revenue: movie.revenue,
            runtime: movie.runtime,
            adult: movie.adult,
            backdrop_path: movie.backdrop_path.clone(),
            budget: movie.budget,
            homepage: movie.homepage.clone(),
            imdb_id: movie.imdb_id.clone(),
            original_language: movie.original_language.clone(),
            original_title: movie.original_title.clone(),
            overview: movie.overview.clone(),
            popularity: movie.popularity,
            poster_path: movie.poster_path.clone(),
            tagline: movie.tagline.clone(),
            genres: Vec::new(),
            production_companies: Vec::new(),
            production_countries: Vec::new(),
            spoken_languages: Vec::new(),
            keywords: Vec::new(),
            decade: movie.decade,
            reviews: Vec::new(),
        };

        for field in MultiValuedField::ALL {
            *document.entries_mut(field) = self.entries(field, movie)?;
        }
        Ok(document)
    }

    /// Transform a batch, keeping its order
    pub fn transform_all(&self, movies: &[Movie]) -> Result<Vec<MovieDocument>> {
        movies.par_iter().map(|movie| self.transform(movie)).collect()
    }

    fn entries(&self, field: MultiValuedField, movie: &Movie) -> Result<Vec<CategoryEntry>> {
        let Some(cell) = field.cell(movie) else {
            return Ok(Vec::new());
        };

        split_names(cell)
            .map(|name| match self.index {
                None => Ok(CategoryEntry::Name(name.to_string())),
                Some(index) => index
                    .table(field)
                    .id_of(name)
                    .map(|id| {
                        CategoryEntry::Tagged(Category {
                            id,
                            name: name.to_string(),
                        })
                    })
                    .ok_or_else(|| TransformError::UnmappedName {
                        field,
                        name: name.to_string(),
                    }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RawMovie;

    fn movie(id: i64) -> Movie {
        Movie::from_raw(RawMovie {
            id: Some(id),
            title: Some("A".to_string()),
            release_date: Some("1994-05-01".to_string()),
            overview: Some("x".to_string()),
            runtime: Some(90),
            adult: Some(false),
            genres: Some("Action, Drama".to_string()),
            keywords: Some("heist, dream".to_string()),
            ..RawMovie::default()
        })
        .unwrap()
    }

    #[test]
    fn test_names_mode() {
        let document = Transformer::names().transform(&movie(5)).unwrap();

        assert_eq!(document.id, 5);
        assert_eq!(document.decade, Some(1990));
        assert_eq!(
            document.genres,
            vec![
                CategoryEntry::Name("Action".to_string()),
                CategoryEntry::Name("Drama".to_string())
            ]
        );
        assert!(document.spoken_languages.is_empty());
        assert!(document.reviews.is_empty());
    }

    #[test]
    fn test_tagged_mode_uses_index_ids() {
        let movies = vec![movie(5)];
        let index = CategoryIndex::build(&movies);
        let transformer = Transformer::tagged(&index);

        let document = transformer.transform(&movies[0]).unwrap();

        assert_eq!(transformer.mode(), EntryMode::Tagged);
        assert_eq!(
            document.keywords,
            vec![
                CategoryEntry::Tagged(Category { id: 0, name: "heist".to_string() }),
                CategoryEntry::Tagged(Category { id: 1, name: "dream".to_string() }),
            ]
        );
    }

    #[test]
    fn test_tagged_mode_rejects_unknown_names() {
        let index = CategoryIndex::new();
        let err = Transformer::tagged(&index).transform(&movie(5)).unwrap_err();

        assert!(matches!(
            err,
            TransformError::UnmappedName { field: MultiValuedField::Genres, .. }
        ));
    }

    #[test]
    fn test_missing_scalars_serialize_as_null() {
        let document = Transformer::names().transform(&movie(5)).unwrap();
        let json = serde_json::to_value(&document).unwrap();

        assert_eq!(json["_id"], 5);
        assert_eq!(json["release_date"], "1994-05-01");
        assert!(json["tagline"].is_null());
        assert!(json["popularity"].is_null());
        assert_eq!(json["reviews"], serde_json::json!([]));
    }

    #[test]
    fn test_transform_all_keeps_order() {
        let movies: Vec<Movie> = (1..=50).map(movie).collect();
        let documents = Transformer::names().transform_all(&movies).unwrap();

        let ids: Vec<_> = documents.iter().map(|d| d.id).collect();
        assert_eq!(ids, (1..=50).collect::<Vec<_>>());
    }
}
