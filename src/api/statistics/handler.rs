//! Statistics handlers

use axum::{
    extract::{Query, State},
    Json,
};

use crate::api::query::FilterQuery;
use crate::core::ServerState;
use crate::ledger::{filter_reports, summarize, FleetSummary};
use crate::utils::{time, AppResult};

/// GET /api/statistics/summary - aggregated figures for the filtered view
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<FleetSummary>> {
    let filter = query.into_filter()?;
    let reports = state.store.list_reports().await?;
    let selected = filter_reports(reports, &filter, time::today());
    Ok(Json(summarize(&selected)))
}
