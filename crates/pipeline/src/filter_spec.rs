//! The set of predicates chosen on the filter form.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{
    DurationBucket, DurationBucketFilter, GenreFilter, MinimumRatingFilter, MinimumVotesFilter,
};
use data_loader::Movie;
use serde::Serialize;
use std::collections::BTreeSet;

/// Independent predicates that together select a subset of the table.
///
/// The default spec keeps every row: bucket `All`, thresholds at zero and
/// no genre constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSpec {
    pub duration: DurationBucket,
    /// Inclusive lower bound on rating
    pub min_rating: f64,
    /// Inclusive lower bound on vote count
    pub min_votes: u64,
    /// Empty means "any genre"
    pub genres: BTreeSet<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, duration: DurationBucket) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_min_votes(mut self, min_votes: u64) -> Self {
        self.min_votes = min_votes;
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Build the filter pipeline for this spec.
    pub fn pipeline(&self) -> FilterPipeline {
        FilterPipeline::new()
            .add_filter(DurationBucketFilter::new(self.duration))
            .add_filter(MinimumRatingFilter::new(self.min_rating))
            .add_filter(MinimumVotesFilter::new(self.min_votes))
            .add_filter(GenreFilter::new(self.genres.iter().cloned()))
    }
}

/// Select the rows of `rows` that satisfy every predicate in `spec`.
///
/// Pure: `rows` is untouched and the result keeps the original order.
/// An empty result is a normal outcome.
pub fn filter(rows: &[Movie], spec: &FilterSpec) -> Vec<Movie> {
    spec.pipeline().apply(rows)
}
