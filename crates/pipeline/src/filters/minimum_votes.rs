//! Filter to enforce a minimum vote count.

use crate::traits::Filter;
use data_loader::Movie;

/// Removes rows with fewer than `min_votes` votes (inclusive bound).
pub struct MinimumVotesFilter {
    min_votes: u64,
}

impl MinimumVotesFilter {
    pub fn new(min_votes: u64) -> Self {
        Self { min_votes }
    }
}

impl Filter for MinimumVotesFilter {
    fn name(&self) -> &str {
        "MinimumVotesFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        movie.voting >= self.min_votes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_votes_filter() {
        let filter = MinimumVotesFilter::new(1_000);

        assert!(filter.keep(&Movie::new("Popular", "Action", 7.0, 50_000, 120)));
        assert!(filter.keep(&Movie::new("Exact", "Action", 7.0, 1_000, 120)));
        assert!(!filter.keep(&Movie::new("Obscure", "Action", 7.0, 999, 120)));
    }
}
