//! Authentication handlers
//!
//! Both logins are plain secret comparison: the driver's PIN against the
//! stored profile, the admin password against the `admin_pwd` setting
//! (hardcoded default when unset). Failures share one message so the
//! response doesn't reveal which part was wrong.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::models::DriverInfo;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLoginRequest {
    pub driver_id: String,
    pub pin: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub ok: bool,
}

/// POST /api/auth/driver-login
pub async fn driver_login(
    State(state): State<ServerState>,
    Json(req): Json<DriverLoginRequest>,
) -> AppResult<Json<DriverInfo>> {
    let driver = state.store.get_driver(&req.driver_id).await?;

    let driver = match driver {
        Some(d) if d.verify_pin(&req.pin) => d,
        Some(_) => {
            tracing::warn!(driver_id = %req.driver_id, "Driver login failed - wrong PIN");
            return Err(AppError::invalid_credentials());
        }
        None => {
            tracing::warn!(driver_id = %req.driver_id, "Driver login failed - unknown driver");
            return Err(AppError::invalid_credentials());
        }
    };

    tracing::info!(driver_id = %driver.id, name = %driver.name, "Driver logged in");

    Ok(Json(DriverInfo::from(driver)))
}

/// POST /api/auth/admin-login
pub async fn admin_login(
    State(state): State<ServerState>,
    Json(req): Json<AdminLoginRequest>,
) -> AppResult<Json<AdminLoginResponse>> {
    let stored = state.store.admin_password().await?;

    if req.password != stored {
        tracing::warn!("Admin login failed - wrong password");
        return Err(AppError::invalid_credentials());
    }

    tracing::info!("Admin logged in");

    Ok(Json(AdminLoginResponse { ok: true }))
}
