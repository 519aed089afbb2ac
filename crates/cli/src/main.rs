use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use data_loader::{load_movies, LoaderConfig, MovieChunks};
use indicatif::{ProgressBar, ProgressStyle};
use pipeline::{CategoryIndex, EntryMode, Transformer};
use sink::{DatabaseSink, MockSink, MongoStore, RunConfig};
use std::time::Instant;
use tracing::info;

/// parse-data - TMDB dataset loader
#[derive(Parser)]
#[command(name = "parse-data")]
#[command(about = "Turn the TMDB movie export into mock fixtures or a MongoDB collection", long_about = None)]
#[command(after_help = "(Set rows to 0 for all rows)")]
struct Cli {
    /// Where the movies go
    #[arg(value_enum)]
    mode: Mode,

    /// Number of cleaned rows to process
    rows: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Write mock_*.json fixtures to the output directory
    Mock,
    /// Load the movies collection in MongoDB
    Db,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = RunConfig::from_env().context("Invalid configuration")?;
    let loader = LoaderConfig::default()
        .with_row_limit(cli.rows)
        .with_require_imdb_id(config.require_imdb_id);

    // Dispatch to appropriate mode handler
    match cli.mode {
        Mode::Mock => handle_mock(&config, &loader)?,
        Mode::Db => handle_db(&config, &loader).await?,
    }

    Ok(())
}

/// Handle the 'mock' mode
fn handle_mock(config: &RunConfig, loader: &LoaderConfig) -> Result<()> {
    let start = Instant::now();
    let movies = load_movies(loader).context("Failed to load the movie dataset")?;

    let index = finish_index(CategoryIndex::build(&movies), config);
    let transformer = Transformer::for_mode(config.entry_mode, &index);
    let summary = MockSink::new(&config.output_dir)
        .write(&movies, &index, transformer)
        .context("Failed to write mock data")?;

    println!(
        "{} Wrote {} movies to {} and {} fixture files in {:?}",
        "✓".green(),
        summary.documents,
        summary.movies_path.display(),
        summary.fixture_paths.len(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'db' mode
async fn handle_db(config: &RunConfig, loader: &LoaderConfig) -> Result<()> {
    let start = Instant::now();
    let store = MongoStore::connect(&config.db)
        .await
        .context("Failed to connect to MongoDB")?;
    let sink = DatabaseSink::new(store, &config.db).with_progress(progress_bar(loader.row_limit)?);

    // Checked up front so a populated collection never costs a prepass
    sink.ensure_empty().await?;

    let index = match config.entry_mode {
        EntryMode::Names => CategoryIndex::new(),
        EntryMode::Tagged => {
            info!("Scanning dataset for category names...");
            let chunks = MovieChunks::open(loader).context("Failed to open the movie dataset")?;
            CategoryIndex::scan(chunks).context("Failed to scan the movie dataset")?
        }
    };
    let index = finish_index(index, config);

    let chunks = MovieChunks::open(loader).context("Failed to open the movie dataset")?;
    let summary = sink
        .fill(chunks, Transformer::for_mode(config.entry_mode, &index))
        .await?;

    println!(
        "{} Inserted {} movies ({} duplicates skipped) in {:?}",
        "✓".green(),
        summary.inserted,
        summary.skipped,
        start.elapsed()
    );
    match summary.threshold {
        Some(threshold) => println!(
            "{} Removed {} movies below popularity {:.3}",
            "✓".green(),
            summary.trimmed,
            threshold
        ),
        None => println!(
            "{} Fewer than {} movies, nothing trimmed",
            "•".cyan(),
            config.db.popularity_rank
        ),
    }
    Ok(())
}

fn finish_index(index: CategoryIndex, config: &RunConfig) -> CategoryIndex {
    if config.sort_category_names {
        index.sorted()
    } else {
        index
    }
}

/// Bar with a length when the row count is known, spinner otherwise
fn progress_bar(row_limit: Option<usize>) -> Result<ProgressBar> {
    let bar = match row_limit {
        Some(limit) => {
            let bar = ProgressBar::new(limit as u64);
            bar.set_style(ProgressStyle::with_template(
                "{bar:40.green} {pos}/{len} movies ({eta})",
            )?);
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(ProgressStyle::with_template(
                "{spinner} {pos} movies processed ({elapsed})",
            )?);
            bar
        }
    };
    Ok(bar)
}
