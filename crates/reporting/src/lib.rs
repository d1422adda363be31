//! Reporting over finalized invoices.
//!
//! Read-only aggregates for the invoice list and the dashboard. Every
//! function takes documents by reference and returns fresh values.

pub mod dashboard;
pub mod sales;
pub mod summary;

pub use dashboard::{monthly_revenue, DashboardMetrics};
pub use sales::{daily_invoice_counts, daily_sales, DailySales};
pub use summary::{InvoiceSummary, StatusLabel};

#[cfg(test)]
pub(crate) mod fixtures;
