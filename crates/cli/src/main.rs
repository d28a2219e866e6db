use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dashboard::{Dashboard, Page, PageReport};
use data_loader::{SqliteStore, DEFAULT_TABLE};
use pipeline::{DurationBucket, FilterSpec};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

mod render;

/// MovieDash - Movie metadata reports
#[derive(Parser)]
#[command(name = "movie-dash")]
#[command(about = "Aggregate reports and ad-hoc filtering over a movie metadata table", long_about = None)]
struct Cli {
    /// Path to the SQLite database holding the movie table
    #[arg(short, long, default_value = "data/imdb.sqlite")]
    database: PathBuf,

    /// Name of the movie table
    #[arg(short, long, default_value = DEFAULT_TABLE)]
    table: String,

    /// Print reports as JSON instead of charts
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Data analysis and visualizations over the whole table
    Overview,

    /// Interactive filtering and analysis
    Filter {
        /// Runtime bucket in hours: all, <2, 2-3, >3
        #[arg(long, default_value = "all")]
        duration: DurationBucket,

        /// Minimum rating (0.0 - 10.0)
        #[arg(long, default_value = "0.0", value_parser = parse_rating)]
        min_rating: f64,

        /// Minimum number of votes
        #[arg(long, default_value = "0")]
        min_votes: u64,

        /// Genre to include (repeat for several; none means all genres)
        #[arg(long = "genre")]
        genres: Vec<String>,

        /// Show the filter form hint without applying filters
        #[arg(long)]
        no_submit: bool,
    },

    /// List the genres available to the filter
    Genres,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of filter requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

/// Parse a rating threshold, allowing only the 0-10 scale.
fn parse_rating(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=10.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("rating must be between 0.0 and 10.0, got {}", value))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("Opening movie store {} (table {})", cli.database.display(), cli.table);
    let store = SqliteStore::open(&cli.database, &cli.table)
        .with_context(|| format!("Failed to open movie store {}", cli.database.display()))?;
    let dashboard = Dashboard::new(Arc::new(store));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Overview => handle_overview(&dashboard, cli.json).await?,
        Commands::Filter {
            duration,
            min_rating,
            min_votes,
            genres,
            no_submit,
        } => {
            let spec = (!no_submit).then(|| {
                FilterSpec::new()
                    .with_duration(duration)
                    .with_min_rating(min_rating)
                    .with_min_votes(min_votes)
                    .with_genres(genres)
            });
            handle_filter(&dashboard, spec, cli.json).await?
        }
        Commands::Genres => handle_genres(&dashboard, cli.json).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(&dashboard, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'overview' command (page 1)
async fn handle_overview(dashboard: &Dashboard, json: bool) -> Result<()> {
    let report = dashboard.render(Page::Overview, None).await?;
    if json {
        return print_json(&report);
    }
    if let PageReport::Overview(overview) = report {
        render::print_overview(&overview);
    }
    Ok(())
}

/// Handle the 'filter' command (page 2)
async fn handle_filter(dashboard: &Dashboard, spec: Option<FilterSpec>, json: bool) -> Result<()> {
    let report = dashboard.render(Page::FilteredAnalysis, spec).await?;
    if json {
        return print_json(&report);
    }
    match report {
        PageReport::FilteredAnalysis {
            report: Some(filtered),
        } => render::print_filtered(&filtered),
        _ => println!(
            "{}",
            "Please apply filters (--duration, --min-rating, --min-votes, --genre) to view filtered visualizations"
                .yellow()
        ),
    }
    Ok(())
}

/// Handle the 'genres' command
async fn handle_genres(dashboard: &Dashboard, json: bool) -> Result<()> {
    let genres = dashboard.session().await?.genre_options();
    if json {
        return print_json(&genres);
    }
    println!("{}", "Available genres:".bold().blue());
    for genre in genres {
        println!("  - {}", genre);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(dashboard: &Dashboard, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("benchmark needs at least one request and one concurrent slot");
    }

    // Warm the table cache so timings cover filtering and reports only
    let genres = dashboard.session().await?.genre_options();

    // Generate a set of random filter selections
    let specs: Vec<FilterSpec> = (0..requests).map(|_| random_spec(&genres)).collect();

    // Use tokio::spawn to make concurrent requests, bounded by a semaphore
    let permits = Arc::new(Semaphore::new(concurrent));
    let wall_start = Instant::now();
    let mut handles = vec![];
    for spec in specs {
        let dashboard = dashboard.clone();
        let permits = Arc::clone(&permits);
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            dashboard.filtered(spec).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let wall_time = wall_start.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// A random filter selection, like a user playing with the form.
fn random_spec(genres: &[String]) -> FilterSpec {
    let bucket = DurationBucket::ALL[rand::random_range(0..DurationBucket::ALL.len())];
    let min_rating = (rand::random_range(0..=100) as f64) / 10.0;
    let min_votes = rand::random_range(0..100_000u64);
    let picked: Vec<String> = genres
        .iter()
        .filter(|_| rand::random_bool(0.3))
        .cloned()
        .collect();

    FilterSpec::new()
        .with_duration(bucket)
        .with_min_rating(min_rating)
        .with_min_votes(min_votes)
        .with_genres(picked)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating_bounds() {
        assert_eq!(parse_rating("7.5"), Ok(7.5));
        assert_eq!(parse_rating("0"), Ok(0.0));
        assert_eq!(parse_rating("10"), Ok(10.0));
        assert!(parse_rating("10.1").is_err());
        assert!(parse_rating("-1").is_err());
        assert!(parse_rating("high").is_err());
    }

    #[test]
    fn test_filter_args() {
        let cli = Cli::try_parse_from([
            "movie-dash",
            "filter",
            "--duration",
            "2-3",
            "--min-rating",
            "7.5",
            "--genre",
            "Drama",
            "--genre",
            "Crime",
        ])
        .unwrap();

        match cli.command {
            Commands::Filter {
                duration,
                min_rating,
                min_votes,
                genres,
                no_submit,
            } => {
                assert_eq!(duration, DurationBucket::TwoToThree);
                assert_eq!(min_rating, 7.5);
                assert_eq!(min_votes, 0);
                assert_eq!(genres, vec!["Drama", "Crime"]);
                assert!(!no_submit);
            }
            _ => panic!("expected filter command"),
        }
        assert_eq!(cli.table, DEFAULT_TABLE);
    }

    #[test]
    fn test_random_spec_stays_in_range() {
        let genres = vec!["Drama".to_string(), "Comedy".to_string()];
        for _ in 0..50 {
            let spec = random_spec(&genres);
            assert!((0.0..=10.0).contains(&spec.min_rating));
            assert!(spec.genres.iter().all(|g| genres.contains(g)));
        }
    }
}
