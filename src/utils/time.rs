//! Time helpers
//!
//! Calendar dates travel as `YYYY-MM-DD` strings on the wire; timestamps
//! are Unix millis.

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's calendar date (UTC)
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}
