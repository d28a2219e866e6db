//! Filter on runtime bucket.
//!
//! Buckets are expressed in hours: under two, two to three (both ends
//! inclusive), and over three.

use crate::traits::Filter;
use data_loader::Movie;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Runtime bucket selectable on the filter form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DurationBucket {
    #[default]
    #[serde(rename = "all")]
    All,
    /// `duration_hrs < 2`
    #[serde(rename = "<2")]
    UnderTwo,
    /// `2 <= duration_hrs <= 3`
    #[serde(rename = "2-3")]
    TwoToThree,
    /// `duration_hrs > 3`
    #[serde(rename = ">3")]
    OverThree,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 4] = [
        DurationBucket::All,
        DurationBucket::UnderTwo,
        DurationBucket::TwoToThree,
        DurationBucket::OverThree,
    ];

    pub fn contains(self, duration_hrs: f64) -> bool {
        match self {
            DurationBucket::All => true,
            DurationBucket::UnderTwo => duration_hrs < 2.0,
            DurationBucket::TwoToThree => (2.0..=3.0).contains(&duration_hrs),
            DurationBucket::OverThree => duration_hrs > 3.0,
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DurationBucket::All => "All",
            DurationBucket::UnderTwo => "< 2",
            DurationBucket::TwoToThree => "2 - 3",
            DurationBucket::OverThree => "> 3",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown duration bucket {0:?} (expected one of: all, <2, 2-3, >3)")]
pub struct ParseBucketError(pub String);

impl FromStr for DurationBucket {
    type Err = ParseBucketError;

    /// Accepts the form labels with or without spaces ("2 - 3", "2-3").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '\u{2013}' { '-' } else { c })
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "all" => Ok(DurationBucket::All),
            "<2" => Ok(DurationBucket::UnderTwo),
            "2-3" => Ok(DurationBucket::TwoToThree),
            ">3" => Ok(DurationBucket::OverThree),
            _ => Err(ParseBucketError(s.to_string())),
        }
    }
}

/// Keeps rows whose runtime falls in the selected bucket.
pub struct DurationBucketFilter {
    bucket: DurationBucket,
}

impl DurationBucketFilter {
    pub fn new(bucket: DurationBucket) -> Self {
        Self { bucket }
    }
}

impl Filter for DurationBucketFilter {
    fn name(&self) -> &str {
        "DurationBucketFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        self.bucket.contains(movie.duration_hrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_with_hours(hours: f64) -> Movie {
        Movie {
            duration_hrs: hours,
            ..Movie::new("Test", "Drama", 7.0, 100, 0)
        }
    }

    #[test]
    fn test_two_to_three_is_inclusive() {
        let filter = DurationBucketFilter::new(DurationBucket::TwoToThree);

        assert!(filter.keep(&movie_with_hours(2.0)));
        assert!(filter.keep(&movie_with_hours(3.0)));
        assert!(!filter.keep(&movie_with_hours(1.99)));
        assert!(!filter.keep(&movie_with_hours(3.01)));
    }

    #[test]
    fn test_open_buckets_exclude_boundaries() {
        let under = DurationBucketFilter::new(DurationBucket::UnderTwo);
        let over = DurationBucketFilter::new(DurationBucket::OverThree);

        assert!(under.keep(&movie_with_hours(1.99)));
        assert!(!under.keep(&movie_with_hours(2.0)));
        assert!(over.keep(&movie_with_hours(3.01)));
        assert!(!over.keep(&movie_with_hours(3.0)));
    }

    #[test]
    fn test_every_runtime_lands_in_exactly_one_bucket() {
        for minutes in [0u32, 60, 119, 120, 150, 180, 181, 400] {
            let movie = Movie::new("Test", "Drama", 7.0, 100, minutes);
            let hits = DurationBucket::ALL[1..]
                .iter()
                .filter(|bucket| bucket.contains(movie.duration_hrs))
                .count();
            assert_eq!(hits, 1, "{} minutes", minutes);
            assert!(DurationBucket::All.contains(movie.duration_hrs));
        }
    }

    #[test]
    fn test_parse_bucket_labels() {
        assert_eq!("All".parse(), Ok(DurationBucket::All));
        assert_eq!("< 2".parse(), Ok(DurationBucket::UnderTwo));
        assert_eq!("2 - 3".parse(), Ok(DurationBucket::TwoToThree));
        assert_eq!("2\u{2013}3".parse(), Ok(DurationBucket::TwoToThree));
        assert_eq!(">3".parse(), Ok(DurationBucket::OverThree));
        assert!("3-4".parse::<DurationBucket>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for bucket in DurationBucket::ALL {
            assert_eq!(bucket.to_string().parse(), Ok(bucket));
        }
    }
}
