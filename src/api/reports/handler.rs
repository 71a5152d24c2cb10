//! Daily report API handlers
//!
//! The entry form submits every amount as free text; amounts are parsed
//! leniently and the derived totals recomputed on every create and edit,
//! never trusted from the payload or from storage.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::query::FilterQuery;
use crate::core::ServerState;
use crate::ledger::{filter_reports, parse_amount, totals};
use crate::models::{DailyReport, ExpenseBreakdown, IncomeBreakdown};
use crate::utils::{time, AppError, AppResult};

/// Report entry form payload - all amount fields arrive as free text
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub driver_id: String,
    /// Denormalized display name; looked up from the profile when absent
    #[serde(default)]
    pub driver_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub distance_km: String,
    #[serde(default)]
    pub login_time: String,
    #[serde(default)]
    pub logout_time: String,
    #[serde(default)]
    pub income_local: String,
    #[serde(default)]
    pub income_outstation: String,
    #[serde(default)]
    pub income_other: String,
    #[serde(default)]
    pub expense_fuel: String,
    #[serde(default)]
    pub expense_maintenance: String,
    #[serde(default)]
    pub expense_toll: String,
    #[serde(default)]
    pub expense_other: String,
    #[serde(default)]
    pub driver_salary: String,
    #[serde(default)]
    pub note: String,
}

impl ReportPayload {
    /// Build a report with freshly computed totals
    fn into_report(self, id: String, driver_name: String, created_at: i64) -> DailyReport {
        let mut report = DailyReport {
            id,
            driver_id: self.driver_id,
            driver_name,
            date: self.date,
            distance_km: parse_amount(&self.distance_km),
            login_time: self.login_time,
            logout_time: self.logout_time,
            income: IncomeBreakdown {
                local: parse_amount(&self.income_local),
                outstation: parse_amount(&self.income_outstation),
                other: parse_amount(&self.income_other),
            },
            expenses: ExpenseBreakdown {
                fuel: parse_amount(&self.expense_fuel),
                maintenance: parse_amount(&self.expense_maintenance),
                toll: parse_amount(&self.expense_toll),
                other: parse_amount(&self.expense_other),
            },
            driver_salary: parse_amount(&self.driver_salary),
            total_income: Default::default(),
            total_expenses: Default::default(),
            net_profit: Default::default(),
            note: self.note,
            created_at,
        };
        totals::apply(&mut report);
        report
    }
}

async fn resolve_driver_name(state: &ServerState, payload: &ReportPayload) -> String {
    if !payload.driver_name.is_empty() {
        return payload.driver_name.clone();
    }
    match state.store.get_driver(&payload.driver_id).await {
        Ok(Some(driver)) => driver.name,
        _ => String::new(),
    }
}

fn validate(payload: &ReportPayload) -> AppResult<()> {
    if payload.driver_id.trim().is_empty() {
        return Err(AppError::validation("Driver is required"));
    }
    Ok(())
}

/// GET /api/reports - filtered report list, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<Vec<DailyReport>>> {
    let filter = query.into_filter()?;
    let reports = state.store.list_reports().await?;
    Ok(Json(filter_reports(reports, &filter, time::today())))
}

/// GET /api/reports/:id - fetch a single report
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DailyReport>> {
    let report = state
        .store
        .get_report(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Report {} not found", id)))?;
    Ok(Json(report))
}

/// POST /api/reports - driver submits a daily report
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReportPayload>,
) -> AppResult<Json<DailyReport>> {
    validate(&payload)?;

    let driver_name = resolve_driver_name(&state, &payload).await;
    let report = payload.into_report(
        Uuid::new_v4().to_string(),
        driver_name,
        time::now_millis(),
    );

    let saved = state.store.upsert_report(report).await?;
    tracing::info!(
        report_id = %saved.id,
        driver_id = %saved.driver_id,
        date = %saved.date,
        net_profit = %saved.net_profit,
        "Report created"
    );
    Ok(Json(saved))
}

/// PUT /api/reports/:id - full replace (admin edit)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReportPayload>,
) -> AppResult<Json<DailyReport>> {
    validate(&payload)?;

    // Full replace keeps the original creation timestamp when the record
    // exists; an unknown id behaves like an insert (upsert semantics).
    let created_at = match state.store.get_report(&id).await? {
        Some(existing) => existing.created_at,
        None => time::now_millis(),
    };

    let driver_name = resolve_driver_name(&state, &payload).await;
    let report = payload.into_report(id, driver_name, created_at);

    let saved = state.store.upsert_report(report).await?;
    Ok(Json(saved))
}

/// DELETE /api/reports/:id - delete (admin, confirmed client-side)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.store.delete_report(&id).await?;
    if deleted {
        tracing::info!(report_id = %id, "Report deleted");
    }
    Ok(Json(deleted))
}
