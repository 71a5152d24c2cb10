//! Settings handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct AdminPasswordPayload {
    pub password: String,
}

/// PUT /api/settings/admin-password - change the admin credential
pub async fn update_admin_password(
    State(state): State<ServerState>,
    Json(payload): Json<AdminPasswordPayload>,
) -> AppResult<Json<bool>> {
    if payload.password.trim().is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }

    state.store.set_admin_password(&payload.password).await?;
    tracing::info!("Admin password changed");
    Ok(Json(true))
}
