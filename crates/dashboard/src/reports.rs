//! Owned, serializable report payloads handed to the presentation layer.
//!
//! Each struct here is one "page" worth of charts and tables. The
//! builders take a slice of rows (the full table or a filtered subset)
//! and run the aggregations from `pipeline::aggregate` over it.

use data_loader::Movie;
use pipeline::aggregate::{self, MeanField, RankField, TOP_N};
use pipeline::{FilterSpec, HistogramBin};
use serde::Serialize;
use std::collections::BTreeMap;

/// Bins in the rating distribution chart (0.5 rating points each).
pub const RATING_HISTOGRAM_BINS: usize = 20;

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub label: String,
    pub value: f64,
}

impl BarEntry {
    fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Row of the "top-rated movie per genre" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreLeader {
    pub title: String,
    pub genre: String,
    pub rating: f64,
}

/// Slice of the vote share (pie) chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareEntry {
    pub genre: String,
    pub votes: u64,
    pub share: f64,
}

/// A movie named together with its runtime in hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedTitle {
    pub title: String,
    pub hours: f64,
}

impl From<&Movie> for TimedTitle {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            hours: movie.duration_hrs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremesReport {
    pub shortest: TimedTitle,
    pub longest: TimedTitle,
}

/// Point of the rating vs. votes scatter chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub rating: f64,
    pub voting: u64,
}

/// The fixed battery of reports over the full table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewReport {
    pub movie_count: usize,
    pub top_by_rating: Vec<BarEntry>,
    pub top_by_votes: Vec<BarEntry>,
    /// Count per genre, most common first
    pub genre_distribution: Vec<BarEntry>,
    /// Mean runtime in hours per genre, shortest first
    pub avg_duration_by_genre: Vec<BarEntry>,
    pub avg_votes_by_genre: Vec<BarEntry>,
    pub rating_histogram: Vec<HistogramBin>,
    pub top_rated_per_genre: Vec<GenreLeader>,
    pub vote_share: Vec<ShareEntry>,
    /// `None` when there are no rows
    pub duration_extremes: Option<ExtremesReport>,
    pub avg_rating_by_genre: Vec<BarEntry>,
    pub rating_vs_votes: Vec<ScatterPoint>,
}

impl OverviewReport {
    pub fn build(rows: &[Movie]) -> Self {
        let mut avg_duration_by_genre = mean_bars(rows, MeanField::DurationHrs);
        avg_duration_by_genre.sort_by(|a, b| a.value.total_cmp(&b.value));

        Self {
            movie_count: rows.len(),
            top_by_rating: ranked_bars(rows, RankField::Rating),
            top_by_votes: ranked_bars(rows, RankField::Voting),
            genre_distribution: distribution_bars(rows),
            avg_duration_by_genre,
            avg_votes_by_genre: mean_bars(rows, MeanField::Voting),
            rating_histogram: aggregate::rating_histogram(rows, RATING_HISTOGRAM_BINS),
            top_rated_per_genre: aggregate::top_rated_per_genre(rows)
                .into_iter()
                .map(|movie| GenreLeader {
                    title: movie.title.clone(),
                    genre: movie.genre.clone(),
                    rating: movie.rating,
                })
                .collect(),
            vote_share: share_entries(&aggregate::genre_vote_share(rows)),
            duration_extremes: aggregate::duration_extremes(rows).map(|extremes| {
                ExtremesReport {
                    shortest: extremes.shortest.into(),
                    longest: extremes.longest.into(),
                }
            }),
            avg_rating_by_genre: mean_bars(rows, MeanField::Rating),
            rating_vs_votes: scatter(rows),
        }
    }
}

/// The reduced battery of reports over a filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredReport {
    pub filter: FilterSpec,
    /// The filtered rows themselves, in table order
    pub movies: Vec<Movie>,
    pub top_by_rating: Vec<BarEntry>,
    pub top_by_votes: Vec<BarEntry>,
    pub genre_distribution: Vec<BarEntry>,
    pub rating_vs_votes: Vec<ScatterPoint>,
}

impl FilteredReport {
    /// Build the report from an already materialized subset.
    pub fn build(filter: FilterSpec, movies: Vec<Movie>) -> Self {
        Self {
            top_by_rating: ranked_bars(&movies, RankField::Rating),
            top_by_votes: ranked_bars(&movies, RankField::Voting),
            genre_distribution: distribution_bars(&movies),
            rating_vs_votes: scatter(&movies),
            filter,
            movies,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

fn ranked_bars(rows: &[Movie], field: RankField) -> Vec<BarEntry> {
    aggregate::top_n(rows, field, TOP_N)
        .into_iter()
        .map(|movie| {
            let value = match field {
                RankField::Rating => movie.rating,
                RankField::Voting => movie.voting as f64,
            };
            BarEntry::new(movie.title.clone(), value)
        })
        .collect()
}

/// Genre counts, most common first; equal counts in genre-name order.
fn distribution_bars(rows: &[Movie]) -> Vec<BarEntry> {
    let mut counts: Vec<(String, usize)> = aggregate::genre_distribution(rows).into_iter().collect();
    // Stable sort over name-ordered input
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(genre, count)| BarEntry::new(genre, count as f64))
        .collect()
}

fn mean_bars(rows: &[Movie], field: MeanField) -> Vec<BarEntry> {
    aggregate::genre_mean(rows, field)
        .into_iter()
        .map(|(genre, mean)| BarEntry::new(genre, mean))
        .collect()
}

fn share_entries(totals: &BTreeMap<String, u64>) -> Vec<ShareEntry> {
    let fractions = aggregate::shares(totals);
    totals
        .iter()
        .map(|(genre, &votes)| ShareEntry {
            genre: genre.clone(),
            votes,
            share: fractions.get(genre).copied().unwrap_or(0.0),
        })
        .collect()
}

fn scatter(rows: &[Movie]) -> Vec<ScatterPoint> {
    aggregate::rating_vote_pairs(rows)
        .into_iter()
        .map(|(rating, voting)| ScatterPoint { rating, voting })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Movie> {
        vec![
            Movie::new("Heat", "Action", 8.3, 700_000, 170),
            Movie::new("Speed", "Action", 7.3, 380_000, 116),
            Movie::new("Amadeus", "Drama", 8.4, 420_000, 160),
            Movie::new("Airplane!", "Comedy", 7.7, 250_000, 88),
            Movie::new("Big", "Comedy", 7.3, 230_000, 104),
        ]
    }

    #[test]
    fn test_overview_orders() {
        let report = OverviewReport::build(&sample());

        assert_eq!(report.movie_count, 5);
        assert_eq!(report.top_by_rating[0].label, "Amadeus");
        assert_eq!(report.top_by_votes[0].label, "Heat");

        let genres: Vec<_> = report.genre_distribution.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(genres, vec!["Action", "Comedy", "Drama"]);

        let by_duration: Vec<_> = report
            .avg_duration_by_genre
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(by_duration, vec!["Comedy", "Action", "Drama"]);
    }

    #[test]
    fn test_overview_leaders_and_extremes() {
        let report = OverviewReport::build(&sample());

        let leaders: Vec<_> = report.top_rated_per_genre.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(leaders, vec!["Heat", "Airplane!", "Amadeus"]);

        let extremes = report.duration_extremes.unwrap();
        assert_eq!(extremes.shortest.title, "Airplane!");
        assert_eq!(extremes.longest.title, "Heat");

        let total_share: f64 = report.vote_share.iter().map(|s| s.share).sum();
        assert!((total_share - 1.0).abs() < 1e-9);
        assert_eq!(report.rating_vs_votes.len(), 5);
    }

    #[test]
    fn test_overview_on_empty_table() {
        let report = OverviewReport::build(&[]);

        assert_eq!(report.movie_count, 0);
        assert!(report.top_by_rating.is_empty());
        assert!(report.genre_distribution.is_empty());
        assert!(report.rating_histogram.is_empty());
        assert!(report.vote_share.is_empty());
        assert!(report.duration_extremes.is_none());
    }

    #[test]
    fn test_filtered_report_keeps_spec_and_rows() {
        let spec = FilterSpec::new().with_genres(["Comedy"]);
        let movies: Vec<Movie> = sample().into_iter().filter(|m| m.genre == "Comedy").collect();

        let report = FilteredReport::build(spec.clone(), movies);
        assert_eq!(report.filter, spec);
        assert_eq!(report.movies.len(), 2);
        assert_eq!(report.genre_distribution, vec![BarEntry::new("Comedy", 2.0)]);
        assert!(!report.is_empty());
    }
}
