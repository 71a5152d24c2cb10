//! Data models
//!
//! Wire shape is camelCase; the snake_case storage shape of the remote
//! table service lives in `store::remote`.

pub mod driver;
pub mod report;

pub use driver::{Driver, DriverInfo};
pub use report::{DailyReport, ExpenseBreakdown, IncomeBreakdown};
