//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while loading the movie table.
///
/// Any of these aborts the whole load; the caller never sees a
/// partially built table.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// The store could not be opened or the query failed
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// The configured table name is not a plain SQL identifier
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    /// A column held a value the movie schema does not allow
    ///
    /// `row` is 1-based in query result order.
    #[error("Invalid value for {field} in row {row}: {value}")]
    InvalidValue {
        field: String,
        row: usize,
        value: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
