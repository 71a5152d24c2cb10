//! PDF statement generation via the Typst CLI
//!
//! The statement mirrors the admin dashboard: a financial summary block
//! (revenue, expense line items, salary, net profit) followed by a
//! per-record transaction log with a totals footer row.

use std::path::{Path, PathBuf};
use std::process::Command;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::ledger::FleetSummary;
use crate::models::DailyReport;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("typst CLI not found on PATH")]
    TypstNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("PDF generation failed: {0}")]
    Render(String),
}

/// One line of the transaction log
#[derive(Debug, Serialize)]
pub struct StatementRow {
    pub date: String,
    pub driver: String,
    pub income: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// Everything the statement template needs, pre-aggregated
#[derive(Debug, Serialize)]
pub struct StatementData {
    pub fleet_name: String,
    pub generated_date: String,
    /// Human description of the active filter, e.g. "This month, all drivers"
    pub filter_label: String,
    // Summary block
    pub income_local: f64,
    pub income_outstation: f64,
    pub income_other: f64,
    pub expense_fuel: f64,
    pub expense_maintenance: f64,
    pub expense_toll: f64,
    pub expense_other: f64,
    pub driver_salary: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    // Transaction log with totals footer
    pub rows: Vec<StatementRow>,
}

fn money(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Shape filtered reports and their summary into template data
pub fn build_statement_data(
    fleet_name: &str,
    filter_label: &str,
    reports: &[DailyReport],
    summary: &FleetSummary,
) -> StatementData {
    let rows = reports
        .iter()
        .map(|r| StatementRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            driver: r.driver_name.clone(),
            income: money(r.total_income),
            expenses: money(r.total_expenses),
            profit: money(r.net_profit),
        })
        .collect();

    StatementData {
        fleet_name: fleet_name.to_string(),
        generated_date: crate::utils::time::today().format("%Y-%m-%d").to_string(),
        filter_label: filter_label.to_string(),
        income_local: money(summary.income_local),
        income_outstation: money(summary.income_outstation),
        income_other: money(summary.income_other),
        expense_fuel: money(summary.expense_fuel),
        expense_maintenance: money(summary.expense_maintenance),
        expense_toll: money(summary.expense_toll),
        expense_other: money(summary.expense_other),
        driver_salary: money(summary.driver_salary),
        total_income: money(summary.total_income),
        total_expenses: money(summary.total_expenses),
        net_profit: money(summary.net_profit),
        rows,
    }
}

/// Embedded Typst template for the statement
/// The placeholder is replaced with the JSON data file path
const STATEMENT_TEMPLATE: &str = r##"// Fleet statement template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
)

#set text(font: "Helvetica", size: 10pt)

#let fmt-currency(amount) = {
  let parts = str(calc.round(amount, digits: 2)).split(".")
  let frac = if parts.len() > 1 { parts.at(1) } else { "00" }
  let frac2 = if frac.len() == 1 { frac + "0" } else { frac }
  parts.at(0) + "." + frac2
}

// Header
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [
    #text(size: 18pt, weight: "bold")[#data.fleet_name]
    #v(0.3em)
    #text(size: 10pt, fill: gray)[#data.filter_label]
  ],
  [
    #text(size: 20pt, weight: "bold")[STATEMENT]
    #v(0.5em)
    #text(size: 10pt, fill: gray)[Generated #data.generated_date]
  ]
)

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

// Financial summary
#grid(
  columns: (1fr, 1fr),
  [
    #text(weight: "bold", size: 11pt)[Revenue]
    #v(0.3em)
    #table(
      columns: (auto, auto),
      stroke: none,
      inset: 3pt,
      [Local trips], [#fmt-currency(data.income_local)],
      [Outstation trips], [#fmt-currency(data.income_outstation)],
      [Other], [#fmt-currency(data.income_other)],
      table.hline(stroke: 0.5pt),
      [*Total income*], [*#fmt-currency(data.total_income)*],
    )
  ],
  [
    #text(weight: "bold", size: 11pt)[Expenses]
    #v(0.3em)
    #table(
      columns: (auto, auto),
      stroke: none,
      inset: 3pt,
      [Fuel], [#fmt-currency(data.expense_fuel)],
      [Maintenance], [#fmt-currency(data.expense_maintenance)],
      [Toll], [#fmt-currency(data.expense_toll)],
      [Other], [#fmt-currency(data.expense_other)],
      [Driver salary], [#fmt-currency(data.driver_salary)],
      table.hline(stroke: 0.5pt),
      [*Total expenses*], [*#fmt-currency(data.total_expenses)*],
    )
  ]
)

#v(0.5em)
#align(right)[
  #text(size: 12pt, weight: "bold")[Net profit: #fmt-currency(data.net_profit)]
]

#v(1.5em)

// Transaction log with totals footer
#table(
  columns: (auto, 1fr, auto, auto, auto),
  align: (left, left, right, right, right),
  stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
  inset: 6pt,
  fill: (x, y) => if y == 0 { luma(240) } else { none },

  // Header
  [*Date*], [*Driver*], [*Income*], [*Expenses*], [*Profit*],

  // Rows
  ..data.rows.map(row => (
    row.date,
    row.driver,
    [#fmt-currency(row.income)],
    [#fmt-currency(row.expenses)],
    [#fmt-currency(row.profit)],
  )).flatten(),

  // Totals footer
  table.hline(stroke: 1pt),
  [*Total*], [],
  [*#fmt-currency(data.total_income)*],
  [*#fmt-currency(data.total_expenses)*],
  [*#fmt-currency(data.net_profit)*],
)
"##;

/// Per-call render workspace; the directory and everything in it is
/// removed on drop
struct RenderWorkspace {
    dir: tempfile::TempDir,
    template_path: PathBuf,
    output_path: PathBuf,
}

/// Write the data file and template into a fresh private directory
///
/// Exports run concurrently, so every render gets its own workspace
/// instead of sharing fixed paths.
fn prepare_workspace(data: &StatementData) -> Result<RenderWorkspace, PdfError> {
    let dir = tempfile::Builder::new().prefix("fleet-ledger-").tempdir()?;

    std::fs::write(
        dir.path().join("statement_data.json"),
        serde_json::to_string(data)?,
    )?;

    let template = STATEMENT_TEMPLATE.replace("DATA_JSON_PATH", "statement_data.json");
    let template_path = dir.path().join("statement.typ");
    std::fs::write(&template_path, template)?;

    let output_path = dir.path().join("statement.pdf");
    Ok(RenderWorkspace {
        dir,
        template_path,
        output_path,
    })
}

/// Render the statement to PDF bytes using the Typst CLI
pub fn render_statement_pdf(data: &StatementData) -> Result<Vec<u8>, PdfError> {
    let typst_check = Command::new("typst").arg("--version").output();
    if typst_check.is_err() {
        return Err(PdfError::TypstNotFound);
    }

    let workspace = prepare_workspace(data)?;

    let output = Command::new("typst")
        .args([
            "compile",
            "--root",
            path_str(workspace.dir.path())?,
            path_str(&workspace.template_path)?,
            path_str(&workspace.output_path)?,
        ])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PdfError::Render(stderr.to_string()));
    }

    Ok(std::fs::read(&workspace.output_path)?)
}

fn path_str(path: &Path) -> Result<&str, PdfError> {
    path.to_str()
        .ok_or_else(|| PdfError::Render("non-UTF8 temp path".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{summarize, totals};
    use crate::models::{ExpenseBreakdown, IncomeBreakdown};
    use chrono::NaiveDate;

    fn report(driver: &str, local: &str, fuel: &str, salary: &str) -> DailyReport {
        let mut r = DailyReport {
            id: String::new(),
            driver_id: "d-1".into(),
            driver_name: driver.into(),
            date: NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
            distance_km: Default::default(),
            login_time: String::new(),
            logout_time: String::new(),
            income: IncomeBreakdown {
                local: local.parse().unwrap(),
                ..Default::default()
            },
            expenses: ExpenseBreakdown {
                fuel: fuel.parse().unwrap(),
                ..Default::default()
            },
            driver_salary: salary.parse().unwrap(),
            total_income: Default::default(),
            total_expenses: Default::default(),
            net_profit: Default::default(),
            note: String::new(),
            created_at: 0,
        };
        totals::apply(&mut r);
        r
    }

    #[test]
    fn footer_totals_match_summary() {
        let reports = vec![report("Ravi", "500", "100", "50"), report("Asha", "300", "60", "50")];
        let summary = summarize(&reports);
        let data = build_statement_data("City Cabs", "All time", &reports, &summary);

        assert_eq!(data.rows.len(), 2);
        let row_income: f64 = data.rows.iter().map(|r| r.income).sum();
        assert_eq!(row_income, data.total_income);
        assert_eq!(data.total_income, 800.0);
        assert_eq!(data.total_expenses, 260.0);
        assert_eq!(data.net_profit, 540.0);
    }

    #[test]
    fn concurrent_renders_get_separate_workspaces() {
        let reports_a = vec![report("Ravi", "500", "100", "50")];
        let data_a = build_statement_data("Fleet A", "Today", &reports_a, &summarize(&reports_a));
        let reports_b = vec![report("Asha", "300", "60", "50")];
        let data_b = build_statement_data("Fleet B", "Today", &reports_b, &summarize(&reports_b));

        let ws_a = prepare_workspace(&data_a).unwrap();
        let ws_b = prepare_workspace(&data_b).unwrap();

        // Distinct directories, each holding its own figures
        assert_ne!(ws_a.dir.path(), ws_b.dir.path());
        let json_a =
            std::fs::read_to_string(ws_a.dir.path().join("statement_data.json")).unwrap();
        let json_b =
            std::fs::read_to_string(ws_b.dir.path().join("statement_data.json")).unwrap();
        assert!(json_a.contains("Fleet A"));
        assert!(json_b.contains("Fleet B"));
        assert!(ws_a.template_path.exists());

        // Dropping one workspace leaves the other untouched
        let gone = ws_a.dir.path().to_path_buf();
        drop(ws_a);
        assert!(!gone.exists());
        assert!(ws_b.template_path.exists());
    }

    #[test]
    fn rows_carry_date_and_driver() {
        let reports = vec![report("Ravi", "500", "100", "50")];
        let summary = summarize(&reports);
        let data = build_statement_data("City Cabs", "Today", &reports, &summary);

        assert_eq!(data.rows[0].date, "2026-08-14");
        assert_eq!(data.rows[0].driver, "Ravi");
        assert_eq!(data.rows[0].profit, 350.0);
    }
}
