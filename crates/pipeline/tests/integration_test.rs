//! Integration tests for the pipeline.
//!
//! These tests verify that filters and aggregations work together over a
//! realistic table, including the empty-subset path.

use data_loader::{Movie, Table};
use pipeline::aggregate::{self, MeanField, RankField};
use pipeline::filters::*;
use pipeline::{filter, Filter, FilterPipeline, FilterSpec};

const GENRES: [&str; 5] = ["Drama", "Comedy", "Action", "Horror", "Sci-Fi"];

fn create_test_table() -> Table {
    // Deterministic spread over ratings, votes, runtimes and genres
    (0..60u32)
        .map(|i| {
            Movie::new(
                format!("Movie {}", i),
                GENRES[(i % 5) as usize],
                ((i * 37) % 101) as f64 / 10.0,
                ((i * 7919) % 50_000) as u64,
                80 + (i * 13) % 140,
            )
        })
        .collect()
}

fn specs() -> Vec<FilterSpec> {
    vec![
        FilterSpec::default(),
        FilterSpec::new().with_duration(DurationBucket::UnderTwo),
        FilterSpec::new()
            .with_duration(DurationBucket::TwoToThree)
            .with_min_rating(5.0),
        FilterSpec::new()
            .with_duration(DurationBucket::OverThree)
            .with_min_votes(10_000)
            .with_genres(["Drama", "Action"]),
        FilterSpec::new().with_min_rating(9.5).with_genres(["Horror"]),
    ]
}

/// Apply each filter as its own narrowing step, in the given order.
fn narrow_in_order(rows: &[Movie], filters: &[&dyn Filter]) -> Vec<Movie> {
    let mut current = rows.to_vec();
    for filter in filters {
        current.retain(|movie| filter.keep(movie));
    }
    current
}

#[test]
fn test_filtered_rows_are_ordered_subsequence() {
    let table = create_test_table();

    for spec in specs() {
        let filtered = filter(&table, &spec);
        let mut source = table.iter();
        for movie in &filtered {
            assert!(
                source.any(|candidate| candidate == movie),
                "filtered rows must appear in source order"
            );
        }
    }
}

#[test]
fn test_filter_is_deterministic_and_leaves_source_untouched() {
    let table = create_test_table();
    let before = table.clone();

    for spec in specs() {
        assert_eq!(filter(&table, &spec), filter(&table, &spec));
    }
    assert_eq!(table, before);
}

#[test]
fn test_predicate_order_does_not_matter() {
    let table = create_test_table();
    let duration = DurationBucketFilter::new(DurationBucket::TwoToThree);
    let rating = MinimumRatingFilter::new(4.0);
    let votes = MinimumVotesFilter::new(5_000);
    let genre = GenreFilter::new(["Drama", "Comedy", "Sci-Fi"]);

    let (d, r, v, g): (&dyn Filter, &dyn Filter, &dyn Filter, &dyn Filter) =
        (&duration, &rating, &votes, &genre);

    let forward = narrow_in_order(&table, &[d, r, v, g]);
    let backward = narrow_in_order(&table, &[g, v, r, d]);
    let shuffled = narrow_in_order(&table, &[v, d, g, r]);

    let pipeline = FilterPipeline::new()
        .add_filter(GenreFilter::new(["Drama", "Comedy", "Sci-Fi"]))
        .add_filter(MinimumRatingFilter::new(4.0))
        .add_filter(DurationBucketFilter::new(DurationBucket::TwoToThree))
        .add_filter(MinimumVotesFilter::new(5_000));

    assert_eq!(forward, backward);
    assert_eq!(forward, shuffled);
    assert_eq!(forward, pipeline.apply(&table));
}

#[test]
fn test_empty_genre_selection_applies_no_constraint() {
    let table = create_test_table();
    let filtered = filter(&table, &FilterSpec::new().with_genres(Vec::<String>::new()));

    assert_eq!(filtered.len(), table.len());
    assert_eq!(aggregate::genre_distribution(&filtered).len(), GENRES.len());
}

#[test]
fn test_absent_genre_gives_empty_reports() {
    let table = create_test_table();
    let filtered = filter(&table, &FilterSpec::new().with_genres(["Western", "Film-Noir"]));

    assert!(filtered.is_empty());
    assert!(aggregate::top_n(&filtered, RankField::Rating, aggregate::TOP_N).is_empty());
    assert!(aggregate::top_n(&filtered, RankField::Voting, aggregate::TOP_N).is_empty());
    assert!(aggregate::genre_distribution(&filtered).is_empty());
    assert!(aggregate::rating_vote_pairs(&filtered).is_empty());
    assert!(aggregate::duration_extremes(&filtered).is_none());
}

#[test]
fn test_aggregates_on_filtered_subset() {
    let table = create_test_table();
    let spec = FilterSpec::new()
        .with_duration(DurationBucket::TwoToThree)
        .with_min_rating(3.0);
    let filtered = filter(&table, &spec);
    assert!(!filtered.is_empty());

    let counts = aggregate::genre_distribution(&filtered);
    assert_eq!(counts.values().sum::<usize>(), filtered.len());

    let means = aggregate::genre_mean(&filtered, MeanField::DurationHrs);
    assert!(means.values().all(|&hours| (2.0..=3.0).contains(&hours)));

    let top = aggregate::top_n(&filtered, RankField::Rating, aggregate::TOP_N);
    assert!(top.len() <= aggregate::TOP_N);
    assert!(top.iter().all(|m| m.rating >= 3.0));
    assert!(top.windows(2).all(|w| w[0].rating >= w[1].rating));

    let extremes = aggregate::duration_extremes(&filtered).unwrap();
    assert!(extremes.shortest.duration_hrs <= extremes.longest.duration_hrs);
}
