//! Ledger core - the pure bookkeeping logic
//!
//! - [`money`] - lenient parsing of free-text amount fields
//! - [`totals`] - derived totals (income, expenses, net profit)
//! - [`filter`] - driver and date-range report filtering
//! - [`summary`] - aggregation for the dashboard and PDF statement
//!
//! Everything in here is a pure function over models; all IO stays in
//! `store` and `api`.

pub mod filter;
pub mod money;
pub mod summary;
pub mod totals;

pub use filter::{filter_reports, DateRange, ReportFilter};
pub use money::parse_amount;
pub use summary::{summarize, FleetSummary};
