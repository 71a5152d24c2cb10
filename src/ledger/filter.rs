//! Report filtering
//!
//! Selects reports by driver and by a date-range mode, then sorts the
//! result newest first. Dates are plain calendar days; "today" is whatever
//! the caller says it is, so the logic stays deterministic under test.

use chrono::{Datelike, Days, NaiveDate};
use serde::Deserialize;

use crate::models::DailyReport;

/// Date-range mode, matching the dashboard's range picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    Today,
    /// Trailing 7 days, inclusive of today
    Week,
    /// Same calendar month and year as today
    Month,
    /// Same calendar year as today
    Year,
    /// Inclusive range between `start` and `end`
    Custom,
    #[default]
    All,
}

/// Combined driver + date filter
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Specific driver id, or `None` for all drivers
    pub driver_id: Option<String>,
    pub range: DateRange,
    /// Custom-range bounds; a missing bound is unbounded on that side
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ReportFilter {
    fn matches(&self, report: &DailyReport, today: NaiveDate) -> bool {
        if let Some(driver_id) = &self.driver_id {
            if &report.driver_id != driver_id {
                return false;
            }
        }
        matches_date(report.date, self, today)
    }
}

fn matches_date(date: NaiveDate, filter: &ReportFilter, today: NaiveDate) -> bool {
    match filter.range {
        DateRange::All => true,
        DateRange::Today => date == today,
        DateRange::Week => {
            let week_start = today.checked_sub_days(Days::new(6)).unwrap_or(today);
            date >= week_start && date <= today
        }
        DateRange::Month => date.year() == today.year() && date.month() == today.month(),
        DateRange::Year => date.year() == today.year(),
        DateRange::Custom => {
            let after_start = filter.start.map_or(true, |s| date >= s);
            let before_end = filter.end.map_or(true, |e| date <= e);
            after_start && before_end
        }
    }
}

/// Apply the filter and sort descending by date (newest entry first on ties)
pub fn filter_reports(
    reports: Vec<DailyReport>,
    filter: &ReportFilter,
    today: NaiveDate,
) -> Vec<DailyReport> {
    let mut selected: Vec<DailyReport> = reports
        .into_iter()
        .filter(|r| filter.matches(r, today))
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    selected
}
