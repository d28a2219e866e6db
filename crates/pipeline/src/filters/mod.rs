//! Filter implementations for the movie pipeline.
//!
//! One filter per field on the filter form; each is a pointwise test on
//! a single row, composed by a FilterPipeline.

pub mod duration_bucket;
pub mod genre;
pub mod minimum_rating;
pub mod minimum_votes;

// Re-export for convenience
pub use duration_bucket::{DurationBucket, DurationBucketFilter, ParseBucketError};
pub use genre::GenreFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use minimum_votes::MinimumVotesFilter;
