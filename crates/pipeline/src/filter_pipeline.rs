//! The FilterPipeline composes multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! row filters together using the builder pattern.

use crate::traits::Filter;
use data_loader::Movie;
use rayon::prelude::*;

/// Conjunction of row filters.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(DurationBucketFilter::new(DurationBucket::TwoToThree))
///     .add_filter(MinimumRatingFilter::new(7.5))
///     .add_filter(GenreFilter::new(["Drama"]));
///
/// let filtered = pipeline.apply(&table);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters in this pipeline, in insertion order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    /// Whether `movie` passes every filter.
    pub fn keep(&self, movie: &Movie) -> bool {
        self.filters.iter().all(|filter| filter.keep(movie))
    }

    /// Apply all filters to `rows`, returning the kept rows.
    ///
    /// ## Algorithm
    /// 1. Test every row against all filters (same snapshot for each filter)
    /// 2. Collect the rows that pass, preserving their original order
    /// 3. Log per-filter rejection counts at debug level
    ///
    /// The input is never modified; kept rows are cloned into a new Vec.
    pub fn apply(&self, rows: &[Movie]) -> Vec<Movie> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            for filter in &self.filters {
                let rejected = rows.par_iter().filter(|movie| !filter.keep(movie)).count();
                tracing::debug!(
                    "Filter {} rejects {} of {} rows",
                    filter.name(),
                    rejected,
                    rows.len()
                );
            }
        }

        // Rayon's collect keeps the input order
        let kept: Vec<Movie> = rows
            .par_iter()
            .filter(|movie| self.keep(movie))
            .cloned()
            .collect();

        tracing::debug!(
            "Filter pipeline kept {} of {} rows",
            kept.len(),
            rows.len()
        );
        kept
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
