//! Filter to enforce a minimum rating.

use crate::traits::Filter;
use data_loader::Movie;

/// Removes rows rated below a threshold.
///
/// The threshold is inclusive: a row rated exactly `min_rating` is kept.
pub struct MinimumRatingFilter {
    min_rating: f64,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Lowest rating kept (0.0 keeps everything)
    pub fn new(min_rating: f64) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        movie.rating >= self.min_rating
    }
}
