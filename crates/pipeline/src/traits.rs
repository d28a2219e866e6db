//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that lets independent row
//! predicates be composed into a FilterPipeline.

use data_loader::Movie;

/// A single row predicate.
///
/// ## Design Note
/// - `Send + Sync` so the pipeline can test rows in parallel
/// - A filter only ever sees one row at a time, so filters commute and
///   none of them can observe another filter's removals
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `movie` passes this filter.
    fn keep(&self, movie: &Movie) -> bool;
}
