//! Terminal rendering of dashboard reports.
//!
//! Bar charts are drawn with block characters scaled to the largest
//! value in each chart; the scatter chart is a coarse character grid.

use colored::Colorize;
use dashboard::reports::{BarEntry, ScatterPoint, ShareEntry};
use dashboard::{FilteredReport, OverviewReport};
use data_loader::Movie;
use pipeline::{DurationBucket, HistogramBin};

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 32;
const SCATTER_COLS: usize = 50;
const SCATTER_ROWS: usize = 12;

pub fn print_overview(report: &OverviewReport) {
    println!("{}", "Data Analysis and Visualizations".bold().blue());
    println!("{} movies loaded\n", report.movie_count);

    section("Top 10 Movies by Rating");
    print_bars(&report.top_by_rating, 1);

    section("Top 10 Movies by Voting Count");
    print_bars(&report.top_by_votes, 0);

    section("Genre Distribution");
    print_bars(&report.genre_distribution, 0);

    section("Average Duration by Genre (hours)");
    print_bars(&report.avg_duration_by_genre, 2);

    section("Average Voting by Genre");
    print_bars(&report.avg_votes_by_genre, 0);

    section("Rating Distribution");
    print_histogram(&report.rating_histogram);

    section("Top-rated Movie per Genre");
    if report.top_rated_per_genre.is_empty() {
        no_data();
    }
    for leader in &report.top_rated_per_genre {
        println!(
            "  {:<20} {:<LABEL_WIDTH$} {:.1}",
            leader.genre,
            truncate(&leader.title, LABEL_WIDTH),
            leader.rating
        );
    }

    section("Most Popular Genres by Voting");
    print_shares(&report.vote_share);

    section("Shortest and Longest Movies");
    match &report.duration_extremes {
        Some(extremes) => {
            println!(
                "  Shortest Movie: {} - {:.2} hrs",
                extremes.shortest.title, extremes.shortest.hours
            );
            println!(
                "  Longest Movie: {} - {:.2} hrs",
                extremes.longest.title, extremes.longest.hours
            );
        }
        None => no_data(),
    }

    section("Avg Ratings by Genre");
    print_bars(&report.avg_rating_by_genre, 2);

    section("Correlation: Ratings vs Voting");
    print_scatter(&report.rating_vs_votes);
}

pub fn print_filtered(report: &FilteredReport) {
    println!("{}", "Interactive Filtering and Analysis".bold().blue());
    let spec = &report.filter;
    let genres = if spec.genres.is_empty() {
        "any".to_string()
    } else {
        spec.genres.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    println!(
        "Duration: {} | Min rating: {:.1} | Min votes: {} | Genres: {}\n",
        duration_label(spec.duration),
        spec.min_rating,
        spec.min_votes,
        genres
    );

    section("Filtered Movies");
    print_movies(&report.movies);

    section("Top 10 Movies by Rating (Filtered)");
    print_bars(&report.top_by_rating, 1);

    section("Top 10 Movies by Voting Count (Filtered)");
    print_bars(&report.top_by_votes, 0);

    section("Genre Distribution (Filtered)");
    print_bars(&report.genre_distribution, 0);

    section("Correlation: Ratings vs Voting (Filtered)");
    print_scatter(&report.rating_vs_votes);
}

fn duration_label(bucket: DurationBucket) -> String {
    match bucket {
        DurationBucket::All => bucket.to_string(),
        _ => format!("{} hrs", bucket),
    }
}

fn section(title: &str) {
    println!("\n{}", title.bold().cyan());
}

fn no_data() {
    println!("  {}", "(no data)".dimmed());
}

fn print_bars(entries: &[BarEntry], decimals: usize) {
    if entries.is_empty() {
        return no_data();
    }
    let max = entries.iter().map(|e| e.value).fold(0.0_f64, f64::max);
    for entry in entries {
        let len = bar_len(entry.value, max);
        println!(
            "  {:<LABEL_WIDTH$} {} {:.decimals$}",
            truncate(&entry.label, LABEL_WIDTH),
            "█".repeat(len).green(),
            entry.value,
        );
    }
}

fn print_histogram(bins: &[HistogramBin]) {
    if bins.is_empty() {
        return no_data();
    }
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;
    for bin in bins {
        println!(
            "  {:>4.1} - {:<4.1} {} {}",
            bin.lower,
            bin.upper,
            "█".repeat(bar_len(bin.count as f64, max)).green(),
            bin.count
        );
    }
}

fn print_shares(shares: &[ShareEntry]) {
    if shares.is_empty() {
        return no_data();
    }
    let mut sorted: Vec<&ShareEntry> = shares.iter().collect();
    sorted.sort_by(|a, b| b.votes.cmp(&a.votes));
    for share in sorted {
        println!(
            "  {:<20} {:>6.2}% ({} votes)",
            share.genre,
            share.share * 100.0,
            share.votes
        );
    }
}

fn print_movies(movies: &[Movie]) {
    if movies.is_empty() {
        return no_data();
    }
    println!(
        "  {:<LABEL_WIDTH$} {:<16} {:>6} {:>10} {:>8} {:>6}",
        "Title".bold(),
        "Genre".bold(),
        "Rating".bold(),
        "Voting".bold(),
        "Duration".bold(),
        "Hours".bold()
    );
    for movie in movies {
        println!(
            "  {:<LABEL_WIDTH$} {:<16} {:>6.1} {:>10} {:>8} {:>6.2}",
            truncate(&movie.title, LABEL_WIDTH),
            truncate(&movie.genre, 16),
            movie.rating,
            movie.voting,
            movie.duration,
            movie.duration_hrs
        );
    }
}

/// Rating on the x axis (0-10), votes on the y axis (0-max).
fn print_scatter(points: &[ScatterPoint]) {
    if points.is_empty() {
        return no_data();
    }
    let max_votes = points.iter().map(|p| p.voting).max().unwrap_or(0).max(1) as f64;
    let mut grid = vec![vec![' '; SCATTER_COLS]; SCATTER_ROWS];
    for point in points {
        let x = ((point.rating.clamp(0.0, 10.0) / 10.0) * (SCATTER_COLS - 1) as f64).round() as usize;
        let y = ((point.voting as f64 / max_votes) * (SCATTER_ROWS - 1) as f64).round() as usize;
        grid[SCATTER_ROWS - 1 - y][x] = '•';
    }
    println!("  votes (max {})", max_votes as u64);
    for row in grid {
        println!("  |{}", row.into_iter().collect::<String>());
    }
    println!("  +{}", "-".repeat(SCATTER_COLS));
    println!("   0{:>width$}", "10 rating", width = SCATTER_COLS);
}

fn bar_len(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        0
    } else {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
