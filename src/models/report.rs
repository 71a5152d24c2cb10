//! Daily report model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income by trip type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    #[serde(default)]
    pub local: Decimal,
    #[serde(default)]
    pub outstation: Decimal,
    #[serde(default)]
    pub other: Decimal,
}

/// Trip expenses by category (driver salary is tracked separately)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    #[serde(default)]
    pub fuel: Decimal,
    #[serde(default)]
    pub maintenance: Decimal,
    #[serde(default)]
    pub toll: Decimal,
    #[serde(default)]
    pub other: Decimal,
}

/// One driver-day of bookkeeping
///
/// The three derived fields are recomputed on every create/edit and never
/// trusted from stored data, but are persisted anyway so read paths stay
/// a plain field access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    #[serde(default)]
    pub id: String,
    pub driver_id: String,
    /// Denormalized copy of the driver's display name
    #[serde(default)]
    pub driver_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub distance_km: Decimal,
    /// Time-of-day strings as entered on the form, e.g. "08:30"
    #[serde(default)]
    pub login_time: String,
    #[serde(default)]
    pub logout_time: String,
    #[serde(default)]
    pub income: IncomeBreakdown,
    #[serde(default)]
    pub expenses: ExpenseBreakdown,
    #[serde(default)]
    pub driver_salary: Decimal,
    // === Derived ===
    #[serde(default)]
    pub total_income: Decimal,
    #[serde(default)]
    pub total_expenses: Decimal,
    #[serde(default)]
    pub net_profit: Decimal,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub created_at: i64,
}
