//! Read access to the relational store holding the movie table.
//!
//! The store is an external collaborator: all it has to do is hand back
//! every row of a fixed-schema table (Title, Genre, Rating, Voting,
//! Duration). [`MovieStore`] is the seam; [`SqliteStore`] is the
//! implementation backed by `rusqlite`.

use crate::error::{DataLoadError, Result};
use crate::types::MovieRow;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::Mutex;

/// Default name of the movie table.
pub const DEFAULT_TABLE: &str = "all_movies";

/// Anything that can return the full movie table in a stable order.
///
/// `Send + Sync` so a single store can back several concurrent sessions.
pub trait MovieStore: Send + Sync {
    /// Short description for logs (e.g. the database path)
    fn describe(&self) -> String;

    /// Run the one read query and return every row.
    fn fetch_all(&self) -> Result<Vec<MovieRow>>;
}

/// SQLite-backed movie store.
///
/// The connection is opened read-only when built from a path; this system
/// never writes to the table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    table: String,
    source: String,
}

impl SqliteStore {
    /// Open the database at `path` read-only and query `table`.
    pub fn open(path: &Path, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            table: table.to_string(),
            source: path.display().to_string(),
        })
    }

    /// Wrap an already open connection (used for in-memory databases).
    pub fn from_connection(conn: Connection, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        Ok(Self {
            conn: Mutex::new(conn),
            table: table.to_string(),
            source: ":memory:".to_string(),
        })
    }

    fn query(&self) -> String {
        format!(
            "SELECT Title, Genre, Rating, Voting, Duration FROM {}",
            self.table
        )
    }
}

impl MovieStore for SqliteStore {
    fn describe(&self) -> String {
        format!("sqlite:{}#{}", self.source, self.table)
    }

    fn fetch_all(&self) -> Result<Vec<MovieRow>> {
        let conn = self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut stmt = conn.prepare(&self.query())?;

        // Columns are read as Option so NULLs surface as a schema error
        // with the row number rather than a type conversion failure.
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<f64>>(2)?,
                    row.get::<_, Option<i64>>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raw.into_iter()
            .enumerate()
            .map(|(idx, (title, genre, rating, voting, duration))| {
                let row = idx + 1;
                Ok(MovieRow {
                    title: required(title, "Title", row)?,
                    genre: required(genre, "Genre", row)?,
                    rating: required(rating, "Rating", row)?,
                    voting: required(voting, "Voting", row)?,
                    duration: required(duration, "Duration", row)?,
                })
            })
            .collect()
    }
}

fn required<T>(value: Option<T>, field: &str, row: usize) -> Result<T> {
    value.ok_or_else(|| DataLoadError::InvalidValue {
        field: field.to_string(),
        row,
        value: "NULL".to_string(),
    })
}

/// Table names are spliced into the query, so only plain identifiers pass.
fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DataLoadError::InvalidTableName(table.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory store seeded with `rows` of (title, genre, rating, voting, duration).
    pub(crate) fn memory_store(rows: &[(&str, &str, f64, i64, i64)]) -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE all_movies (
                Title TEXT,
                Genre TEXT,
                Rating REAL,
                Voting INTEGER,
                Duration INTEGER
            );",
        )
        .unwrap();
        for (title, genre, rating, voting, duration) in rows {
            conn.execute(
                "INSERT INTO all_movies (Title, Genre, Rating, Voting, Duration)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![title, genre, rating, voting, duration],
            )
            .unwrap();
        }
        SqliteStore::from_connection(conn, DEFAULT_TABLE).unwrap()
    }

    #[test]
    fn test_fetch_all_preserves_order() {
        let store = memory_store(&[
            ("Inception", "Sci-Fi", 8.8, 2_400_000, 148),
            ("Up", "Animation", 8.3, 1_100_000, 96),
        ]);

        let rows = store.fetch_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Inception");
        assert_eq!(rows[1].genre, "Animation");
        assert_eq!(rows[1].duration, 96);
    }

    #[test]
    fn test_null_column_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE all_movies (Title TEXT, Genre TEXT, Rating REAL, Voting INTEGER, Duration INTEGER);
             INSERT INTO all_movies VALUES ('Heat', NULL, 8.3, 700000, 170);",
        )
        .unwrap();
        let store = SqliteStore::from_connection(conn, DEFAULT_TABLE).unwrap();

        let err = store.fetch_all().unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidValue { ref field, row: 1, .. } if field == "Genre"
        ));
    }

    #[test]
    fn test_missing_table_is_store_error() {
        let conn = Connection::open_in_memory().unwrap();
        let store = SqliteStore::from_connection(conn, DEFAULT_TABLE).unwrap();
        assert!(matches!(store.fetch_all(), Err(DataLoadError::Store(_))));
    }

    #[test]
    fn test_missing_database_file_fails_to_open() {
        let result = SqliteStore::open(Path::new("/nonexistent/dir/imdb.sqlite"), DEFAULT_TABLE);
        assert!(matches!(result, Err(DataLoadError::Store(_))));
    }

    #[test]
    fn test_table_name_validation() {
        assert!(validate_table_name("all_movies").is_ok());
        assert!(validate_table_name("_t2").is_ok());
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("2movies").is_err());
        assert!(validate_table_name("movies; DROP TABLE x").is_err());
    }
}
