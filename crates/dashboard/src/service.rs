//! # Dashboard Service
//!
//! Coordinates one render of the dashboard:
//! 1. Get the movie table (from the process-lifetime cache, or the store)
//! 2. Open a session over it
//! 3. Build the requested page's reports
//!
//! Store access and report building are blocking, CPU/IO-bound work, so
//! they run on tokio's blocking pool. Many renders can be in flight at
//! once; they share only the read-only cached table.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use data_loader::{MovieStore, Table, TableCache};
use pipeline::FilterSpec;

use crate::reports::{FilteredReport, OverviewReport};
use crate::session::{DashboardSession, Page};

/// Reports for one rendered page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageReport {
    Overview(OverviewReport),
    /// `None` until a filter has been submitted
    FilteredAnalysis { report: Option<FilteredReport> },
}

/// Entry point shared by every session.
#[derive(Clone)]
pub struct Dashboard {
    store: Arc<dyn MovieStore>,
    cache: Arc<TableCache>,
}

impl Dashboard {
    /// Create a dashboard over `store` with its own table cache.
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self::with_cache(store, Arc::new(TableCache::new()))
    }

    /// Create a dashboard that shares an existing cache.
    pub fn with_cache(store: Arc<dyn MovieStore>, cache: Arc<TableCache>) -> Self {
        Self { store, cache }
    }

    /// Get the cached table, loading it on first use.
    ///
    /// A load failure fails the render; nothing partial is returned.
    pub async fn table(&self) -> Result<Arc<Table>> {
        let store = Arc::clone(&self.store);
        let cache = Arc::clone(&self.cache);
        tokio::task::spawn_blocking(move || cache.get_or_load(store.as_ref()))
            .await
            .context("Table load task panicked")?
            .context("Failed to load movie table")
    }

    /// Open a fresh session over the cached table.
    pub async fn session(&self) -> Result<DashboardSession> {
        Ok(DashboardSession::new(self.table().await?))
    }

    /// Page 1 reports.
    pub async fn overview(&self) -> Result<OverviewReport> {
        let session = self.session().await?;
        tokio::task::spawn_blocking(move || session.overview())
            .await
            .context("Overview task panicked")
    }

    /// Page 2 reports for `spec`.
    pub async fn filtered(&self, spec: FilterSpec) -> Result<FilteredReport> {
        let mut session = self.session().await?;
        session.submit(spec);
        let report = tokio::task::spawn_blocking(move || session.filtered_report())
            .await
            .context("Filter task panicked")?;
        report.context("Filtered report missing after submit")
    }

    /// Render `page`. For the filter page, `spec` is the submitted form
    /// (or `None` if the form has not been submitted).
    pub async fn render(&self, page: Page, spec: Option<FilterSpec>) -> Result<PageReport> {
        let start = Instant::now();
        let report = match (page, spec) {
            (Page::Overview, _) => PageReport::Overview(self.overview().await?),
            (Page::FilteredAnalysis, Some(spec)) => PageReport::FilteredAnalysis {
                report: Some(self.filtered(spec).await?),
            },
            (Page::FilteredAnalysis, None) => PageReport::FilteredAnalysis { report: None },
        };
        info!("Rendered {:?} page in {:.2?}", page, start.elapsed());
        Ok(report)
    }
}
