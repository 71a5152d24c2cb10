//! Summary aggregation
//!
//! Collapses a filtered set of reports into the figures shown on the admin
//! dashboard and printed on the statement header.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::DailyReport;

/// Aggregated figures for a set of reports
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub report_count: usize,
    pub total_distance_km: Decimal,
    // Income by trip type
    pub income_local: Decimal,
    pub income_outstation: Decimal,
    pub income_other: Decimal,
    // Expenses by category
    pub expense_fuel: Decimal,
    pub expense_maintenance: Decimal,
    pub expense_toll: Decimal,
    pub expense_other: Decimal,
    pub driver_salary: Decimal,
    // Grand totals
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
}

/// Aggregate reports into a [`FleetSummary`]
///
/// Grand totals are derived from the breakdowns, not read from the stored
/// per-report totals.
pub fn summarize(reports: &[DailyReport]) -> FleetSummary {
    let mut s = FleetSummary {
        report_count: reports.len(),
        ..Default::default()
    };

    for r in reports {
        s.total_distance_km += r.distance_km;
        s.income_local += r.income.local;
        s.income_outstation += r.income.outstation;
        s.income_other += r.income.other;
        s.expense_fuel += r.expenses.fuel;
        s.expense_maintenance += r.expenses.maintenance;
        s.expense_toll += r.expenses.toll;
        s.expense_other += r.expenses.other;
        s.driver_salary += r.driver_salary;
    }

    s.total_income = s.income_local + s.income_outstation + s.income_other;
    s.total_expenses =
        s.expense_fuel + s.expense_maintenance + s.expense_toll + s.expense_other + s.driver_salary;
    s.net_profit = s.total_income - s.total_expenses;
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::totals;
    use crate::models::{ExpenseBreakdown, IncomeBreakdown};
    use chrono::NaiveDate;

    fn dec(v: &str) -> Decimal {
        v.parse().unwrap()
    }

    fn report(local: &str, fuel: &str, salary: &str) -> DailyReport {
        let mut r = DailyReport {
            id: String::new(),
            driver_id: "d-1".into(),
            driver_name: String::new(),
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            distance_km: dec("100"),
            login_time: String::new(),
            logout_time: String::new(),
            income: IncomeBreakdown {
                local: dec(local),
                ..Default::default()
            },
            expenses: ExpenseBreakdown {
                fuel: dec(fuel),
                ..Default::default()
            },
            driver_salary: dec(salary),
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
    fn sums_breakdowns_across_reports() {
        let reports = vec![report("500", "100", "50"), report("300.25", "80", "50")];
        let s = summarize(&reports);

        assert_eq!(s.report_count, 2);
        assert_eq!(s.total_distance_km, dec("200"));
        assert_eq!(s.income_local, dec("800.25"));
        assert_eq!(s.expense_fuel, dec("180"));
        assert_eq!(s.driver_salary, dec("100"));
        assert_eq!(s.total_income, dec("800.25"));
        assert_eq!(s.total_expenses, dec("280"));
        assert_eq!(s.net_profit, dec("520.25"));
    }

    #[test]
    fn empty_set_is_all_zeros() {
        let s = summarize(&[]);
        assert_eq!(s.report_count, 0);
        assert_eq!(s.net_profit, Decimal::ZERO);
    }
}
