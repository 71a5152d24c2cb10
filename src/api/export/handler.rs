//! Statement export handler

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};

use crate::api::query::FilterQuery;
use crate::core::ServerState;
use crate::ledger::{filter_reports, summarize};
use crate::pdf::{build_statement_data, render_statement_pdf, PdfError};
use crate::utils::{time, AppError, AppResult};

/// GET /api/export/statement - PDF statement for the filtered view
pub async fn statement(
    State(state): State<ServerState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<impl IntoResponse> {
    let label = statement_label(&state, &query).await;
    let filter = query.into_filter()?;
    let reports = state.store.list_reports().await?;
    let selected = filter_reports(reports, &filter, time::today());
    let summary = summarize(&selected);

    let data = build_statement_data(&state.config.fleet_name, &label, &selected, &summary);

    // Typst compilation shells out; keep it off the async workers
    let pdf = tokio::task::spawn_blocking(move || render_statement_pdf(&data))
        .await
        .map_err(|e| AppError::internal(format!("Export task failed: {}", e)))?
        .map_err(|e| match e {
            PdfError::TypstNotFound => {
                AppError::internal("typst CLI is not installed on the server")
            }
            other => AppError::internal(other.to_string()),
        })?;

    tracing::info!(bytes = pdf.len(), "Statement exported");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"statement.pdf\"".to_string(),
            ),
        ],
        pdf,
    ))
}

/// "This month - all drivers" / "Today - Ravi"
async fn statement_label(state: &ServerState, query: &FilterQuery) -> String {
    let driver_part = match query.driver.as_deref() {
        None | Some("") | Some("all") => "all drivers".to_string(),
        Some(id) => match state.store.get_driver(id).await {
            Ok(Some(driver)) => driver.name,
            _ => id.to_string(),
        },
    };
    format!("{} - {}", query.range_label(), driver_part)
}
