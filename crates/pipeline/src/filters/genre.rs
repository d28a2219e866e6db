//! Filter to keep only selected genres.

use crate::traits::Filter;
use data_loader::Movie;
use std::collections::BTreeSet;

/// Keeps rows whose genre is in the selected set.
///
/// ## Algorithm
/// 1. If no genres are selected, keep every row
/// 2. Otherwise keep a row iff its genre is a member of the set
///
/// Matching is exact (case-sensitive), like the genre options offered on
/// the form.
pub struct GenreFilter {
    genres: BTreeSet<String>,
}

impl GenreFilter {
    pub fn new<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genres: genres.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        self.genres.is_empty() || self.genres.contains(&movie.genre)
    }
}
