//! Tests for the database load sequence against an in-memory store.

use async_trait::async_trait;
use data_loader::{Movie, RawMovie};
use pipeline::{CategoryIndex, MovieDocument, Transformer};
use sink::{
    BatchOutcome, DatabaseSink, DbConfig, MovieStore, SinkError, MOVIE_INDEX_FIELDS,
    REVIEW_INDEX_FIELDS,
};
use std::sync::Mutex;

/// Stand-in for a MongoDB collection with a unique `_id`
#[derive(Default)]
struct InMemoryStore {
    movies: Mutex<Vec<MovieDocument>>,
    insert_calls: Mutex<usize>,
    movie_indexes: Mutex<Vec<String>>,
    review_indexes: Mutex<Vec<String>>,
}

impl InMemoryStore {
    fn with_movies(movies: Vec<MovieDocument>) -> Self {
        Self {
            movies: Mutex::new(movies),
            ..Self::default()
        }
    }

    fn ids(&self) -> Vec<i64> {
        self.movies.lock().unwrap().iter().map(|m| m.id).collect()
    }
}

#[async_trait]
impl MovieStore for InMemoryStore {
    async fn count_movies(&self) -> sink::Result<u64> {
        Ok(self.movies.lock().unwrap().len() as u64)
    }

    async fn insert_batch(&self, documents: &[MovieDocument]) -> sink::Result<BatchOutcome> {
        *self.insert_calls.lock().unwrap() += 1;
        let mut movies = self.movies.lock().unwrap();
        let mut outcome = BatchOutcome::default();
        for document in documents {
            if movies.iter().any(|m| m.id == document.id) {
                outcome.skipped += 1;
            } else {
                movies.push(document.clone());
                outcome.inserted += 1;
            }
        }
        Ok(outcome)
    }

    async fn create_popularity_index(&self) -> sink::Result<()> {
        self.movie_indexes.lock().unwrap().push("popularity_desc".to_string());
        Ok(())
    }

    async fn popularity_at_offset(&self, offset: u64) -> sink::Result<Option<f64>> {
        let mut popularity: Vec<f64> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| m.popularity)
            .collect();
        popularity.sort_by(|a, b| b.partial_cmp(a).unwrap());
        Ok(popularity.get(offset as usize).copied())
    }

    async fn delete_below_popularity(&self, threshold: f64) -> sink::Result<u64> {
        let mut movies = self.movies.lock().unwrap();
        let before = movies.len();
        movies.retain(|m| !m.popularity.is_some_and(|p| p < threshold));
        Ok((before - movies.len()) as u64)
    }

    async fn create_movie_indexes(&self, fields: &[&str]) -> sink::Result<()> {
        let mut indexes = self.movie_indexes.lock().unwrap();
        indexes.extend(fields.iter().map(|f| f.to_string()));
        Ok(())
    }

    async fn create_review_indexes(&self, fields: &[&str]) -> sink::Result<()> {
        let mut indexes = self.review_indexes.lock().unwrap();
        indexes.extend(fields.iter().map(|f| f.to_string()));
        Ok(())
    }
}

fn movie(id: i64, popularity: Option<f64>) -> Movie {
    Movie::from_raw(RawMovie {
        id: Some(id),
        title: Some(format!("Movie {}", id)),
        release_date: Some("1999-12-31".to_string()),
        overview: Some("Plot".to_string()),
        runtime: Some(100),
        popularity,
        genres: Some("Drama".to_string()),
        ..RawMovie::default()
    })
    .unwrap()
}

fn chunks(batches: Vec<Vec<Movie>>) -> Vec<data_loader::Result<Vec<Movie>>> {
    batches.into_iter().map(Ok).collect()
}

fn config(popularity_rank: u64) -> DbConfig {
    DbConfig {
        popularity_rank,
        ..DbConfig::default()
    }
}

#[tokio::test]
async fn test_fill_inserts_every_batch() {
    let sink = DatabaseSink::new(InMemoryStore::default(), &config(10_000));
    let batches = vec![
        vec![movie(1, Some(3.0)), movie(2, Some(2.0))],
        vec![movie(3, Some(1.0))],
    ];

    let summary = sink.fill(chunks(batches), Transformer::names()).await.unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(sink.processed(), 3);
    assert_eq!(*sink.store().insert_calls.lock().unwrap(), 2);
    assert_eq!(sink.store().ids(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_populated_collection_is_left_alone() {
    let existing = Transformer::names().transform(&movie(42, Some(9.0))).unwrap();
    let sink = DatabaseSink::new(InMemoryStore::with_movies(vec![existing]), &config(10_000));

    let err = sink
        .fill(chunks(vec![vec![movie(1, Some(1.0))]]), Transformer::names())
        .await
        .unwrap_err();

    assert!(matches!(err, SinkError::CollectionNotEmpty { count: 1, .. }));
    assert_eq!(*sink.store().insert_calls.lock().unwrap(), 0);
    assert_eq!(sink.store().ids(), vec![42]);
    assert!(sink.store().movie_indexes.lock().unwrap().is_empty());
    assert_eq!(sink.processed(), 0);
}

#[tokio::test]
async fn test_duplicate_keys_are_skipped() {
    let sink = DatabaseSink::new(InMemoryStore::default(), &config(10_000));
    let batches = vec![
        vec![movie(1, Some(1.0)), movie(2, Some(1.0))],
        vec![movie(2, Some(5.0)), movie(3, Some(1.0))],
    ];

    let summary = sink.fill(chunks(batches), Transformer::names()).await.unwrap();

    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(sink.store().ids(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_trim_keeps_movies_at_or_above_rank() {
    let sink = DatabaseSink::new(InMemoryStore::default(), &config(3));
    let batch = vec![
        movie(1, Some(5.0)),
        movie(2, Some(1.0)),
        movie(3, Some(4.0)),
        movie(4, Some(3.0)),
        movie(5, Some(3.0)),
        movie(6, Some(2.0)),
        movie(7, None),
    ];

    let summary = sink.fill(chunks(vec![batch]), Transformer::names()).await.unwrap();

    assert_eq!(summary.threshold, Some(3.0));
    assert_eq!(summary.trimmed, 2);
    // Ties with the threshold survive; movies without a popularity are not compared
    assert_eq!(sink.store().ids(), vec![1, 3, 4, 5, 7]);
}

#[tokio::test]
async fn test_small_collection_is_not_trimmed() {
    let sink = DatabaseSink::new(InMemoryStore::default(), &config(10_000));
    let batch = vec![movie(1, Some(5.0)), movie(2, Some(0.1))];

    let summary = sink.fill(chunks(vec![batch]), Transformer::names()).await.unwrap();

    assert_eq!(summary.threshold, None);
    assert_eq!(summary.trimmed, 0);
    assert_eq!(sink.store().ids(), vec![1, 2]);
}

#[tokio::test]
async fn test_indexes_are_built_once_after_loading() {
    let sink = DatabaseSink::new(InMemoryStore::default(), &config(10_000));
    let batches = vec![vec![movie(1, Some(1.0))], vec![movie(2, Some(2.0))]];

    sink.fill(chunks(batches), Transformer::names()).await.unwrap();

    let movie_indexes = sink.store().movie_indexes.lock().unwrap().clone();
    let mut expected = vec!["popularity_desc".to_string()];
    expected.extend(MOVIE_INDEX_FIELDS.iter().map(|f| f.to_string()));
    assert_eq!(movie_indexes, expected);

    let review_indexes = sink.store().review_indexes.lock().unwrap().clone();
    assert_eq!(review_indexes, REVIEW_INDEX_FIELDS.to_vec());
}

#[tokio::test]
async fn test_load_errors_propagate() {
    let sink = DatabaseSink::new(InMemoryStore::default(), &config(10_000));
    let batches: Vec<data_loader::Result<Vec<Movie>>> = vec![
        Ok(vec![movie(1, Some(1.0))]),
        Err(data_loader::DataLoadError::InvalidValue {
            field: "row".to_string(),
            value: "broken".to_string(),
        }),
    ];

    let err = sink.fill(batches, Transformer::names()).await.unwrap_err();

    assert!(matches!(err, SinkError::Load(_)));
    assert!(sink.store().movie_indexes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_tagged_documents_need_complete_tables() {
    let sink = DatabaseSink::new(InMemoryStore::default(), &config(10_000));
    let index = CategoryIndex::new();

    let err = sink
        .fill(chunks(vec![vec![movie(1, Some(1.0))]]), Transformer::tagged(&index))
        .await
        .unwrap_err();

    assert!(matches!(err, SinkError::Transform(_)));
    assert!(sink.store().ids().is_empty());
}
