//! Derived totals
//!
//! `total_income = local + outstation + other`
//! `total_expenses = fuel + maintenance + toll + other + driver_salary`
//! `net_profit = total_income - total_expenses`
//!
//! Recomputed on every create/edit; the stored copies are read-time
//! denormalization only.

use rust_decimal::Decimal;

use crate::models::{DailyReport, ExpenseBreakdown, IncomeBreakdown};

/// Sum of the income breakdown
pub fn total_income(income: &IncomeBreakdown) -> Decimal {
    income.local + income.outstation + income.other
}

/// Sum of trip expenses plus the separately tracked driver salary
pub fn total_expenses(expenses: &ExpenseBreakdown, driver_salary: Decimal) -> Decimal {
    expenses.fuel + expenses.maintenance + expenses.toll + expenses.other + driver_salary
}

/// Recompute the three derived fields on a report in place
pub fn apply(report: &mut DailyReport) {
    report.total_income = total_income(&report.income);
    report.total_expenses = total_expenses(&report.expenses, report.driver_salary);
    report.net_profit = report.total_income - report.total_expenses;
}
