//! Aggregations over a movie table (full or filtered).
//!
//! Every function here is pure and accepts an empty slice, returning an
//! empty result (or `None` where the aggregate is undefined) instead of
//! failing. Group-by results use `BTreeMap` so genre order is stable.
//!
//! Ties are broken by original row order everywhere: ranked lists use a
//! stable sort, and per-group/global extrema keep the first row found.

use data_loader::Movie;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of rows in the dashboard's ranked reports.
pub const TOP_N: usize = 10;

/// Numeric column a ranked report can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankField {
    Rating,
    Voting,
}

/// Numeric column a per-genre mean can be taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeanField {
    DurationHrs,
    Voting,
    Rating,
}

impl MeanField {
    fn value(self, movie: &Movie) -> f64 {
        match self {
            MeanField::DurationHrs => movie.duration_hrs,
            MeanField::Voting => movie.voting as f64,
            MeanField::Rating => movie.rating,
        }
    }
}

/// Top `n` rows sorted descending by `field`.
///
/// The sort is stable, so rows with equal values stay in table order.
pub fn top_n(rows: &[Movie], field: RankField, n: usize) -> Vec<&Movie> {
    let mut ranked: Vec<&Movie> = rows.iter().collect();
    match field {
        RankField::Rating => ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        RankField::Voting => ranked.sort_by(|a, b| b.voting.cmp(&a.voting)),
    }
    ranked.truncate(n);
    ranked
}

/// Row count per genre.
pub fn genre_distribution(rows: &[Movie]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for movie in rows {
        *counts.entry(movie.genre.clone()).or_insert(0) += 1;
    }
    counts
}

/// Arithmetic mean of `field` per genre.
///
/// Only genres with at least one row appear in the result.
pub fn genre_mean(rows: &[Movie], field: MeanField) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for movie in rows {
        let entry = totals.entry(movie.genre.as_str()).or_insert((0.0, 0));
        entry.0 += field.value(movie);
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(genre, (sum, count))| (genre.to_string(), sum / count as f64))
        .collect()
}

/// Highest rated row of each genre, ordered by genre name.
///
/// On equal ratings the first row in table order wins.
pub fn top_rated_per_genre(rows: &[Movie]) -> Vec<&Movie> {
    let mut best: BTreeMap<&str, &Movie> = BTreeMap::new();
    for movie in rows {
        best.entry(movie.genre.as_str())
            .and_modify(|current| {
                if movie.rating > current.rating {
                    *current = movie;
                }
            })
            .or_insert(movie);
    }
    best.into_values().collect()
}

/// Shortest and longest rows by runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationExtremes<'a> {
    pub shortest: &'a Movie,
    pub longest: &'a Movie,
}

/// Shortest and longest rows, or `None` for an empty table.
///
/// The first row reaching the minimum/maximum is reported.
pub fn duration_extremes(rows: &[Movie]) -> Option<DurationExtremes<'_>> {
    let (first, rest) = rows.split_first()?;
    let mut extremes = DurationExtremes {
        shortest: first,
        longest: first,
    };
    for movie in rest {
        if movie.duration_hrs < extremes.shortest.duration_hrs {
            extremes.shortest = movie;
        }
        if movie.duration_hrs > extremes.longest.duration_hrs {
            extremes.longest = movie;
        }
    }
    Some(extremes)
}

/// `(rating, voting)` for every row, in table order.
pub fn rating_vote_pairs(rows: &[Movie]) -> Vec<(f64, u64)> {
    rows.iter().map(|movie| (movie.rating, movie.voting)).collect()
}

/// Total votes per genre.
pub fn genre_vote_share(rows: &[Movie]) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for movie in rows {
        *totals.entry(movie.genre.clone()).or_insert(0) += movie.voting;
    }
    totals
}

/// Convert per-genre vote totals into fractions of the overall total.
///
/// Returns an empty map when there are no votes at all.
pub fn shares(totals: &BTreeMap<String, u64>) -> BTreeMap<String, f64> {
    let total: u64 = totals.values().sum();
    if total == 0 {
        return BTreeMap::new();
    }
    totals
        .iter()
        .map(|(genre, &votes)| (genre.clone(), votes as f64 / total as f64))
        .collect()
}

/// One bar of the rating histogram, `[lower, upper)` (last bar closed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Lowest and highest rating on the scale.
pub const RATING_SCALE: (f64, f64) = (0.0, 10.0);

/// Equal-width histogram of ratings over the 0-10 scale.
///
/// Ratings outside the scale are counted in the nearest edge bin.
/// Empty input or `bins == 0` gives an empty histogram.
pub fn rating_histogram(rows: &[Movie], bins: usize) -> Vec<HistogramBin> {
    if rows.is_empty() || bins == 0 {
        return Vec::new();
    }
    let (low, high) = RATING_SCALE;
    let width = (high - low) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: low + width * i as f64,
            upper: low + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for movie in rows {
        let slot = ((movie.rating - low) / width).floor();
        let idx = if slot.is_nan() || slot < 0.0 {
            0
        } else {
            (slot as usize).min(bins - 1)
        };
        histogram[idx].count += 1;
    }
    histogram
}
