//! The movie document: the unit written to a fixture file or a collection.

use crate::fields::MultiValuedField;
use chrono::NaiveDate;
use data_loader::MovieId;
use serde::{Deserialize, Serialize};

/// A distinct name of a multi-valued field together with its run-local id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// One element of a multi-valued field.
///
/// Serialized as a bare string or as `{ "id": .., "name": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryEntry {
    Name(String),
    Tagged(Category),
}

impl CategoryEntry {
    pub fn name(&self) -> &str {
        match self {
            CategoryEntry::Name(name) => name,
            CategoryEntry::Tagged(category) => &category.name,
        }
    }
}

/// Normalized movie record.
///
/// Every optional scalar is serialized as an explicit `null` when the
/// source cell was missing. The identifier is written under `_id` so the
/// same document can be inserted into MongoDB unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDocument {
    #[serde(rename = "_id")]
    pub id: MovieId,
    pub title: String,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub status: Option<String>,
    pub release_date: Option<NaiveDate>,
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
    pub genres: Vec<CategoryEntry>,
    pub production_companies: Vec<CategoryEntry>,
    pub production_countries: Vec<CategoryEntry>,
    pub spoken_languages: Vec<CategoryEntry>,
    pub keywords: Vec<CategoryEntry>,
    pub decade: Option<i32>,
    /// Filled in by the review service, never by the loader
    pub reviews: Vec<serde_json::Value>,
}

impl MovieDocument {
    pub fn entries(&self, field: MultiValuedField) -> &[CategoryEntry] {
        match field {
            MultiValuedField::Genres => &self.genres,
            MultiValuedField::Keywords => &self.keywords,
            MultiValuedField::SpokenLanguages => &self.spoken_languages,
            MultiValuedField::ProductionCompanies => &self.production_companies,
            MultiValuedField::ProductionCountries => &self.production_countries,
        }
    }

    pub(crate) fn entries_mut(&mut self, field: MultiValuedField) -> &mut Vec<CategoryEntry> {
        match field {
            MultiValuedField::Genres => &mut self.genres,
            MultiValuedField::Keywords => &mut self.keywords,
            MultiValuedField::SpokenLanguages => &mut self.spoken_languages,
            MultiValuedField::ProductionCompanies => &mut self.production_companies,
            MultiValuedField::ProductionCountries => &mut self.production_countries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serialization() {
        let bare = serde_json::to_value(CategoryEntry::Name("Drama".to_string())).unwrap();
        assert_eq!(bare, serde_json::json!("Drama"));

        let tagged = serde_json::to_value(CategoryEntry::Tagged(Category {
            id: 3,
            name: "Drama".to_string(),
        }))
        .unwrap();
        assert_eq!(tagged, serde_json::json!({ "id": 3, "name": "Drama" }));
    }

    #[test]
    fn test_entry_deserialization() {
        let entries: Vec<CategoryEntry> =
            serde_json::from_str(r#"["Drama", {"id": 1, "name": "Action"}]"#).unwrap();
        assert_eq!(entries[0].name(), "Drama");
        assert!(matches!(entries[1], CategoryEntry::Tagged(Category { id: 1, .. })));
    }
}
