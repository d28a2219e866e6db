use anyhow::{Context, Result};
use data_loader::{SqliteStore, TableCache, DEFAULT_TABLE};
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let db_path = Path::new("data/imdb.sqlite");

    println!("Loading movie table from {}...\n", db_path.display());

    let store = SqliteStore::open(db_path, DEFAULT_TABLE).context("Failed to open store")?;
    let cache = TableCache::new();

    let start = Instant::now();
    let table = cache.get_or_load(&store).context("Failed to load movie table")?;
    let cold = start.elapsed();

    let start = Instant::now();
    let _ = cache.get_or_load(&store)?;
    let warm = start.elapsed();

    println!("=== Load Complete ===");
    println!("Cold load: {:?}", cold);
    println!("Cached load: {:?}", warm);
    println!("Movies: {}", table.len());
    println!("Genres: {}", table.distinct_genres().len());
    println!(
        "\nPerformance: {:.0} rows/second",
        table.len() as f64 / cold.as_secs_f64()
    );
    Ok(())
}
