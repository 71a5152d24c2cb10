//! Shared filter query parameters
//!
//! The reports list, the statistics summary and the statement export all
//! accept the same driver + date-range query string.

use serde::Deserialize;

use crate::ledger::{DateRange, ReportFilter};
use crate::utils::{time, AppResult};

/// Query string of the filtered views
///
/// `?driver=d-1&range=custom&startDate=2026-08-01&endDate=2026-08-15`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    /// Driver id, or "all" / absent for every driver
    pub driver: Option<String>,
    #[serde(default)]
    pub range: DateRange,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl FilterQuery {
    /// Convert to a [`ReportFilter`], validating any custom bounds
    ///
    /// Blank bound strings behave like absent bounds.
    pub fn into_filter(self) -> AppResult<ReportFilter> {
        let driver_id = self
            .driver
            .filter(|d| !d.is_empty() && d != "all");

        let parse_bound = |bound: Option<String>| -> AppResult<Option<chrono::NaiveDate>> {
            match bound.as_deref() {
                None | Some("") => Ok(None),
                Some(s) => Ok(Some(time::parse_date(s)?)),
            }
        };

        Ok(ReportFilter {
            driver_id,
            range: self.range,
            start: parse_bound(self.start_date)?,
            end: parse_bound(self.end_date)?,
        })
    }

    /// Human description of the active range, used on statements
    pub fn range_label(&self) -> String {
        match self.range {
            DateRange::Today => "Today".to_string(),
            DateRange::Week => "Last 7 days".to_string(),
            DateRange::Month => "This month".to_string(),
            DateRange::Year => "This year".to_string(),
            DateRange::Custom => {
                let start = self.start_date.as_deref().unwrap_or("...");
                let end = self.end_date.as_deref().unwrap_or("...");
                format!("{} to {}", start, end)
            }
            DateRange::All => "All time".to_string(),
        }
    }
}
