//! Per-user dashboard session.
//!
//! A session carries the shared, read-only table and the user's current
//! filter selection. Nothing here is global: callers create a session
//! from the cached table and pass it along.

use std::sync::Arc;
use std::time::Instant;

use data_loader::Table;
use pipeline::{filter, FilterSpec};
use tracing::{debug, info};

use crate::reports::{FilteredReport, OverviewReport};

/// The two pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Fixed battery of reports over the whole table
    Overview,
    /// Filter form plus reports over the filtered subset
    FilteredAnalysis,
}

/// State of one user's session.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    table: Arc<Table>,
    /// `None` until the filter form has been submitted
    filter: Option<FilterSpec>,
}

impl DashboardSession {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            filter: None,
        }
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Options for the genre multi-select, in first-appearance order.
    pub fn genre_options(&self) -> Vec<String> {
        self.table
            .distinct_genres()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Record a submitted filter selection, replacing any previous one.
    pub fn submit(&mut self, spec: FilterSpec) {
        debug!("Filter submitted: {:?}", spec);
        self.filter = Some(spec);
    }

    pub fn current_filter(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }

    /// Page 1: every overview report over the full table.
    pub fn overview(&self) -> OverviewReport {
        let start = Instant::now();
        let report = OverviewReport::build(&self.table);
        info!(
            "Built overview over {} movies in {:.2?}",
            self.table.len(),
            start.elapsed()
        );
        report
    }

    /// Page 2: reports over the submitted filter, recomputed from scratch.
    ///
    /// Returns `None` if no filter has been submitted yet.
    pub fn filtered_report(&self) -> Option<FilteredReport> {
        let spec = self.filter.as_ref()?;
        let start = Instant::now();

        // The subset is fully materialized before any aggregation runs
        let subset = filter(&self.table, spec);
        info!(
            "Filter kept {} of {} movies",
            subset.len(),
            self.table.len()
        );

        let report = FilteredReport::build(spec.clone(), subset);
        debug!("Built filtered report in {:.2?}", start.elapsed());
        Some(report)
    }
}
