//! Dashboard crate for the movie metadata reports.
//!
//! This crate assembles the two dashboard pages from the loader and the
//! filter/aggregation pipeline: sessions, report payloads, and the async
//! service that serves them.

pub mod reports;
pub mod session;
pub mod service;

pub use reports::{FilteredReport, OverviewReport};
pub use service::{Dashboard, PageReport};
pub use session::{DashboardSession, Page};
