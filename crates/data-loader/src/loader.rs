//! Building the in-memory [`Table`] from a store, and caching it.
//!
//! The table is materialized once per process: [`TableCache`] runs the
//! store query on first use and hands every later caller the same
//! `Arc<Table>`.

use crate::error::{DataLoadError, Result};
use crate::store::MovieStore;
use crate::types::{Movie, MovieRow, Table};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Valid rating range; values outside it are kept but logged.
const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

/// Fetch every row from `store` and build the table.
///
/// Steps:
/// 1. Run the store's single read query
/// 2. Validate each row and derive `duration_hrs`
/// 3. Return the table in store order
///
/// Fails as a whole if the query or any row fails.
pub fn load_table(store: &dyn MovieStore) -> Result<Table> {
    let start = Instant::now();
    info!("Loading movie table from {}", store.describe());

    let rows = store.fetch_all()?;
    let movies = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| to_movie(row, idx + 1))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Loaded {} movies in {:.2?}",
        movies.len(),
        start.elapsed()
    );
    Ok(Table::new(movies))
}

fn to_movie(row: MovieRow, row_no: usize) -> Result<Movie> {
    let voting = u64::try_from(row.voting).map_err(|_| DataLoadError::InvalidValue {
        field: "Voting".to_string(),
        row: row_no,
        value: row.voting.to_string(),
    })?;
    let duration = u32::try_from(row.duration).map_err(|_| DataLoadError::InvalidValue {
        field: "Duration".to_string(),
        row: row_no,
        value: row.duration.to_string(),
    })?;
    if !RATING_RANGE.contains(&row.rating) {
        warn!(
            "Row {} ({}) has rating {} outside 0-10",
            row_no, row.title, row.rating
        );
    }
    Ok(Movie::new(row.title, row.genre, row.rating, voting, duration))
}

/// Lazily loaded, process-lifetime movie table.
///
/// The first successful [`get_or_load`](Self::get_or_load) stores the
/// table; later calls return the same `Arc` without touching the store.
/// Concurrent first callers serialize on an init lock so the query runs
/// once. A failed load stores nothing, so the next call tries again.
pub struct TableCache {
    table: OnceLock<Arc<Table>>,
    init: Mutex<()>,
}

impl TableCache {
    pub const fn new() -> Self {
        Self {
            table: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Return the cached table, loading it from `store` on first use.
    pub fn get_or_load(&self, store: &dyn MovieStore) -> Result<Arc<Table>> {
        if let Some(table) = self.table.get() {
            debug!("Movie table served from cache");
            return Ok(Arc::clone(table));
        }

        let _guard = self.init.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Another caller may have finished loading while we waited
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_table(store)?);
        let _ = self.table.set(Arc::clone(&table));
        Ok(table)
    }

    /// The cached table, if one has been loaded.
    pub fn get(&self) -> Option<Arc<Table>> {
        self.table.get().cloned()
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new()
    }
}
