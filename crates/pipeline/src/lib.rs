//! Filtering and aggregation over the in-memory movie table.
//!
//! This crate provides:
//! - Filter trait and one implementation per filter-form field
//! - FilterPipeline for composing filters
//! - FilterSpec, the user's filter selection, and `filter()` to apply it
//! - Pure aggregations (top-N, per-genre counts/means/maxima, extremes,
//!   rating/vote pairs, vote shares, rating histogram)
//!
//! ## Architecture
//! Reports are produced in two stages:
//! 1. Filters narrow the table to a new, fully materialized subset
//! 2. Aggregations summarize that subset (or the full table)
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{aggregate, filter, FilterSpec, DurationBucket};
//!
//! let spec = FilterSpec::new()
//!     .with_duration(DurationBucket::TwoToThree)
//!     .with_min_rating(7.5)
//!     .with_genres(["Drama"]);
//!
//! let subset = filter(&table, &spec);
//! let best = aggregate::top_n(&subset, aggregate::RankField::Rating, aggregate::TOP_N);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod filter_spec;
pub mod aggregate;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use filter_spec::{filter, FilterSpec};
pub use filters::{DurationBucket, ParseBucketError};
pub use aggregate::{DurationExtremes, HistogramBin, MeanField, RankField, TOP_N};
