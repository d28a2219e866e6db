//! Core domain types for the movie metadata table.
//!
//! The store hands back loosely-checked [`MovieRow`]s; the loader turns
//! them into typed [`Movie`] records with the derived duration in hours
//! and collects them into an immutable [`Table`].

use serde::Serialize;
use std::ops::Deref;

/// Minutes per hour, used to derive `duration_hrs` at load time.
pub const MINUTES_PER_HOUR: f64 = 60.0;

// =============================================================================
// Raw store rows
// =============================================================================

/// One row exactly as the store returned it.
///
/// Integer columns stay signed here so the loader can reject negative
/// values with a useful error instead of a silent wrap.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRow {
    pub title: String,
    pub genre: String,
    pub rating: f64,
    pub voting: i64,
    pub duration: i64,
}

// =============================================================================
// Movie
// =============================================================================

/// A single movie record.
///
/// `duration_hrs` is computed once in [`Movie::new`] and carried on the
/// record from then on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub title: String,
    /// Single genre per row
    pub genre: String,
    /// Expected range 0-10
    pub rating: f64,
    /// Number of votes
    pub voting: u64,
    /// Runtime in minutes
    pub duration: u32,
    /// Runtime in hours (`duration / 60`)
    pub duration_hrs: f64,
}

impl Movie {
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        rating: f64,
        voting: u64,
        duration: u32,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            rating,
            voting,
            duration,
            duration_hrs: duration as f64 / MINUTES_PER_HOUR,
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// The loaded movie table.
///
/// Rows keep the order the store returned them in. A `Table` is never
/// mutated after it has been built; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    rows: Vec<Movie>,
}

impl Table {
    pub fn new(rows: Vec<Movie>) -> Self {
        Self { rows }
    }

    /// Distinct genres in order of first appearance.
    pub fn distinct_genres(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .map(|movie| movie.genre.as_str())
            .filter(|genre| seen.insert(*genre))
            .collect()
    }
}

impl Deref for Table {
    type Target = [Movie];

    fn deref(&self) -> &[Movie] {
        &self.rows
    }
}

impl From<Vec<Movie>> for Table {
    fn from(rows: Vec<Movie>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<Movie> for Table {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
