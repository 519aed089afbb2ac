//! MongoDB implementation of `MovieStore`.

use crate::config::DbConfig;
use crate::error::Result;
use crate::store::{BatchOutcome, MovieStore};
use async_trait::async_trait;
use mongodb::bson::{self, doc, Bson, DateTime, Document};
use mongodb::error::{Error, ErrorKind};
use mongodb::options::{FindOneOptions, InsertManyOptions};
use mongodb::{Client, Collection, IndexModel};
use pipeline::MovieDocument;
use tracing::{debug, info, warn};

/// Server error code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

/// Movie and review collections of one database
#[derive(Clone)]
pub struct MongoStore {
    movies: Collection<Document>,
    reviews: Collection<Document>,
}

impl MongoStore {
    /// Connect using the URI and names from `config`
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);
        info!("Connected to MongoDB database {}", config.database);

        Ok(Self {
            movies: database.collection(&config.movies_collection),
            reviews: database.collection(&config.reviews_collection),
        })
    }
}

/// Encode a movie document for MongoDB.
///
/// The release date is stored as a BSON datetime at midnight UTC so the
/// date index orders and compares real dates.
pub fn to_bson_document(movie: &MovieDocument) -> Result<Document> {
    let mut document = bson::to_document(movie)?;
    if let Some(date) = movie.release_date.and_then(|d| d.and_hms_opt(0, 0, 0)) {
        let millis = date.and_utc().timestamp_millis();
        document.insert("release_date", Bson::DateTime(DateTime::from_millis(millis)));
    }
    Ok(document)
}

/// Documents the server refused in an unordered batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Rejections {
    duplicates: u64,
    other: u64,
}

impl Rejections {
    fn total(self) -> u64 {
        self.duplicates + self.other
    }
}

/// Sort per-document write error codes into duplicates and other rejections.
///
/// Returns `None` when the failure is not about individual documents: a
/// write concern error, or a bulk failure without any write errors.
fn classify_rejections(codes: &[i32], write_concern_failed: bool) -> Option<Rejections> {
    if write_concern_failed || codes.is_empty() {
        return None;
    }
    let duplicates = codes.iter().filter(|&&code| code == DUPLICATE_KEY).count() as u64;
    Some(Rejections {
        duplicates,
        other: codes.len() as u64 - duplicates,
    })
}

fn rejected_documents(error: &Error) -> Option<Rejections> {
    match error.kind.as_ref() {
        ErrorKind::BulkWrite(failure) => {
            let codes: Vec<i32> = failure
                .write_errors
                .iter()
                .flatten()
                .map(|e| e.code)
                .collect();
            classify_rejections(&codes, failure.write_concern_error.is_some())
        }
        _ => None,
    }
}

fn ascending(fields: &[&str]) -> Vec<IndexModel> {
    fields
        .iter()
        .map(|field| {
            let mut keys = Document::new();
            keys.insert(*field, 1);
            IndexModel::builder().keys(keys).build()
        })
        .collect()
}

#[async_trait]
impl MovieStore for MongoStore {
    async fn count_movies(&self) -> Result<u64> {
        Ok(self.movies.count_documents(doc! {}, None).await?)
    }

    async fn insert_batch(&self, documents: &[MovieDocument]) -> Result<BatchOutcome> {
        if documents.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let batch = documents
            .iter()
            .map(to_bson_document)
            .collect::<Result<Vec<_>>>()?;
        let total = batch.len() as u64;
        let options = InsertManyOptions::builder().ordered(false).build();

        match self.movies.insert_many(batch, options).await {
            Ok(result) => Ok(BatchOutcome {
                inserted: result.inserted_ids.len() as u64,
                skipped: 0,
            }),
            Err(e) => {
                let Some(rejections) = rejected_documents(&e) else {
                    return Err(e.into());
                };
                if rejections.duplicates > 0 {
                    debug!("{} duplicate ids rejected in batch of {}", rejections.duplicates, total);
                }
                if rejections.other > 0 {
                    warn!("{} documents rejected by the server in batch of {}", rejections.other, total);
                }
                let skipped = rejections.total();
                Ok(BatchOutcome {
                    inserted: total - skipped,
                    skipped,
                })
            }
        }
    }

    async fn create_popularity_index(&self) -> Result<()> {
        let model = IndexModel::builder().keys(doc! { "popularity": -1 }).build();
        self.movies.create_index(model, None).await?;
        Ok(())
    }

    async fn popularity_at_offset(&self, offset: u64) -> Result<Option<f64>> {
        let options = FindOneOptions::builder()
            .sort(doc! { "popularity": -1 })
            .skip(offset)
            .projection(doc! { "popularity": 1 })
            .build();
        let found = self
            .movies
            .find_one(doc! { "popularity": { "$ne": Bson::Null } }, options)
            .await?;

        Ok(found.and_then(|document| document.get("popularity").and_then(Bson::as_f64)))
    }

    async fn delete_below_popularity(&self, threshold: f64) -> Result<u64> {
        let result = self
            .movies
            .delete_many(doc! { "popularity": { "$lt": threshold } }, None)
            .await?;
        Ok(result.deleted_count)
    }

    async fn create_movie_indexes(&self, fields: &[&str]) -> Result<()> {
        self.movies.create_indexes(ascending(fields), None).await?;
        Ok(())
    }

    async fn create_review_indexes(&self, fields: &[&str]) -> Result<()> {
        self.reviews.create_indexes(ascending(fields), None).await?;
        Ok(())
    }
}
