//! # Data Loader Crate
//!
//! Loads the movie metadata table from a relational store into memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Table)
//! - **store**: The store seam and its SQLite implementation
//! - **loader**: Row validation, derived columns and the process-lifetime cache
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{SqliteStore, TableCache, DEFAULT_TABLE};
//! use std::path::Path;
//!
//! let store = SqliteStore::open(Path::new("data/imdb.sqlite"), DEFAULT_TABLE)?;
//! let cache = TableCache::new();
//!
//! // First call queries the store, later calls reuse the same table
//! let table = cache.get_or_load(&store)?;
//! println!("{} movies, {} genres", table.len(), table.distinct_genres().len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod store;
pub mod loader;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use loader::{load_table, TableCache};
pub use store::{MovieStore, SqliteStore, DEFAULT_TABLE};
pub use types::{Movie, MovieRow, Table, MINUTES_PER_HOUR};
