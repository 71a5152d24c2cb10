//! Remote table-service client
//!
//! Talks to the managed table API:
//!
//! ```text
//! GET    {base}/tables/{table}/rows          list
//! GET    {base}/tables/{table}/rows/{id}     fetch (404 = absent)
//! PUT    {base}/tables/{table}/rows/{id}     upsert
//! DELETE {base}/tables/{table}/rows/{id}     delete (404 = absent)
//! GET    {base}/health                       connectivity probe
//! ```
//!
//! The storage shape is snake_case and flat; the camelCase record shape of
//! the models is mapped through the row structs in this module and nowhere
//! else.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LedgerStore, StoreError, StoreResult};
use crate::models::{DailyReport, Driver, ExpenseBreakdown, IncomeBreakdown};

const DRIVERS_TABLE: &str = "drivers";
const REPORTS_TABLE: &str = "daily_reports";
const SETTINGS_TABLE: &str = "app_settings";
const ADMIN_PWD_KEY: &str = "admin_pwd";

/// HTTP client for the managed table service
#[derive(Clone)]
pub struct RemoteTableStore {
    client: Client,
    base_url: String,
    api_key: String,
    probe_timeout: Duration,
}

impl RemoteTableStore {
    pub fn new(
        base_url: String,
        api_key: String,
        request_timeout_ms: u64,
        probe_timeout_ms: u64,
    ) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            probe_timeout: Duration::from_millis(probe_timeout_ms),
        })
    }

    /// Cheap liveness probe against the table service
    ///
    /// Used by the fallback selector; failures are expected and not logged
    /// here.
    pub async fn is_reachable(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        self.client
            .get(url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map(|resp| resp.status().is_success())
            .unwrap_or(false)
    }

    fn rows_url(&self, table: &str) -> String {
        format!("{}/tables/{}/rows", self.base_url, table)
    }

    fn row_url(&self, table: &str, id: &str) -> String {
        format!("{}/tables/{}/rows/{}", self.base_url, table, id)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    async fn list_rows<R: serde::de::DeserializeOwned>(&self, table: &str) -> StoreResult<Vec<R>> {
        let resp = self
            .authorize(self.client.get(self.rows_url(table)))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    async fn get_row<R: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
    ) -> StoreResult<Option<R>> {
        let resp = self
            .authorize(self.client.get(self.row_url(table, id)))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status()?;
        Ok(Some(resp.json().await?))
    }

    async fn put_row<R: Serialize>(&self, table: &str, id: &str, row: &R) -> StoreResult<()> {
        self.authorize(self.client.put(self.row_url(table, id)))
            .json(row)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_row(&self, table: &str, id: &str) -> StoreResult<bool> {
        let resp = self
            .authorize(self.client.delete(self.row_url(table, id)))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        resp.error_for_status()?;
        Ok(true)
    }
}

// ========== Storage rows (snake_case, flat) ==========

#[derive(Debug, Serialize, Deserialize)]
struct DriverRow {
    id: String,
    driver_name: String,
    #[serde(default)]
    vehicle: String,
    pin: String,
}

impl From<Driver> for DriverRow {
    fn from(d: Driver) -> Self {
        Self {
            id: d.id,
            driver_name: d.name,
            vehicle: d.vehicle,
            pin: d.pin,
        }
    }
}

impl From<DriverRow> for Driver {
    fn from(r: DriverRow) -> Self {
        Self {
            id: r.id,
            name: r.driver_name,
            vehicle: r.vehicle,
            pin: r.pin,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReportRow {
    id: String,
    driver_id: String,
    #[serde(default)]
    driver_name: String,
    report_date: NaiveDate,
    #[serde(default)]
    distance_km: Decimal,
    #[serde(default)]
    login_time: String,
    #[serde(default)]
    logout_time: String,
    #[serde(default)]
    income_local: Decimal,
    #[serde(default)]
    income_outstation: Decimal,
    #[serde(default)]
    income_other: Decimal,
    #[serde(default)]
    expense_fuel: Decimal,
    #[serde(default)]
    expense_maintenance: Decimal,
    #[serde(default)]
    expense_toll: Decimal,
    #[serde(default)]
    expense_other: Decimal,
    #[serde(default)]
    driver_salary: Decimal,
    #[serde(default)]
    total_income: Decimal,
    #[serde(default)]
    total_expenses: Decimal,
    #[serde(default)]
    net_profit: Decimal,
    #[serde(default)]
    note: String,
    #[serde(default)]
    created_at: i64,
}

impl From<DailyReport> for ReportRow {
    fn from(r: DailyReport) -> Self {
        Self {
            id: r.id,
            driver_id: r.driver_id,
            driver_name: r.driver_name,
            report_date: r.date,
            distance_km: r.distance_km,
            login_time: r.login_time,
            logout_time: r.logout_time,
            income_local: r.income.local,
            income_outstation: r.income.outstation,
            income_other: r.income.other,
            expense_fuel: r.expenses.fuel,
            expense_maintenance: r.expenses.maintenance,
            expense_toll: r.expenses.toll,
            expense_other: r.expenses.other,
            driver_salary: r.driver_salary,
            total_income: r.total_income,
            total_expenses: r.total_expenses,
            net_profit: r.net_profit,
            note: r.note,
            created_at: r.created_at,
        }
    }
}

impl From<ReportRow> for DailyReport {
    fn from(r: ReportRow) -> Self {
        Self {
            id: r.id,
            driver_id: r.driver_id,
            driver_name: r.driver_name,
            date: r.report_date,
            distance_km: r.distance_km,
            login_time: r.login_time,
            logout_time: r.logout_time,
            income: IncomeBreakdown {
                local: r.income_local,
                outstation: r.income_outstation,
                other: r.income_other,
            },
            expenses: ExpenseBreakdown {
                fuel: r.expense_fuel,
                maintenance: r.expense_maintenance,
                toll: r.expense_toll,
                other: r.expense_other,
            },
            driver_salary: r.driver_salary,
            total_income: r.total_income,
            total_expenses: r.total_expenses,
            net_profit: r.net_profit,
            note: r.note,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SettingRow {
    key: String,
    value: String,
}

#[async_trait]
impl LedgerStore for RemoteTableStore {
    async fn list_drivers(&self) -> StoreResult<Vec<Driver>> {
        let rows: Vec<DriverRow> = self.list_rows(DRIVERS_TABLE).await?;
        Ok(rows.into_iter().map(Driver::from).collect())
    }

    async fn get_driver(&self, id: &str) -> StoreResult<Option<Driver>> {
        let row: Option<DriverRow> = self.get_row(DRIVERS_TABLE, id).await?;
        Ok(row.map(Driver::from))
    }

    async fn upsert_driver(&self, driver: Driver) -> StoreResult<Driver> {
        let row = DriverRow::from(driver.clone());
        self.put_row(DRIVERS_TABLE, &row.id, &row).await?;
        Ok(driver)
    }

    async fn delete_driver(&self, id: &str) -> StoreResult<bool> {
        self.delete_row(DRIVERS_TABLE, id).await
    }

    async fn list_reports(&self) -> StoreResult<Vec<DailyReport>> {
        let rows: Vec<ReportRow> = self.list_rows(REPORTS_TABLE).await?;
        Ok(rows.into_iter().map(DailyReport::from).collect())
    }

    async fn get_report(&self, id: &str) -> StoreResult<Option<DailyReport>> {
        let row: Option<ReportRow> = self.get_row(REPORTS_TABLE, id).await?;
        Ok(row.map(DailyReport::from))
    }

    async fn upsert_report(&self, report: DailyReport) -> StoreResult<DailyReport> {
        let row = ReportRow::from(report.clone());
        self.put_row(REPORTS_TABLE, &row.id, &row).await?;
        Ok(report)
    }

    async fn delete_report(&self, id: &str) -> StoreResult<bool> {
        self.delete_row(REPORTS_TABLE, id).await
    }

    async fn admin_password(&self) -> StoreResult<String> {
        let row: Option<SettingRow> = self.get_row(SETTINGS_TABLE, ADMIN_PWD_KEY).await?;
        match row {
            Some(s) => Ok(s.value),
            None => Err(StoreError::NotFound("admin_pwd setting".to_string())),
        }
    }

    async fn set_admin_password(&self, password: &str) -> StoreResult<()> {
        let row = SettingRow {
            key: ADMIN_PWD_KEY.to_string(),
            value: password.to_string(),
        };
        self.put_row(SETTINGS_TABLE, ADMIN_PWD_KEY, &row).await
    }
}
