//! Statement exporter
//!
//! Feeds pre-aggregated summary rows to the Typst CLI. Rendering internals
//! belong to Typst; this module only shapes data and drives the compile.

pub mod statement;

pub use statement::{build_statement_data, render_statement_pdf, PdfError, StatementData};
