//! Turns a user's transactions into a monthly income and expense chart.
//!
//! The pipeline has three stages: [`monthly_summary`] folds transactions into
//! month-bucketed series, [`ChartDocument`] describes the chart those series
//! should produce, and a [`ChartRenderer`] sends the document to an external
//! rendering service in exchange for a URL.

mod aggregation;
mod client;
mod document;

pub use aggregation::{MonthlySummary, monthly_summary};
pub use client::{ChartRenderer, QuickChartClient};
pub use document::ChartDocument;
