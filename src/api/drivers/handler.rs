//! Driver API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::models::Driver;
use crate::utils::{AppError, AppResult};

/// Driver create/update payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPayload {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vehicle: String,
    pub pin: String,
}

fn validate(payload: &DriverPayload) -> AppResult<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Driver name is required"));
    }
    if payload.pin.trim().is_empty() {
        return Err(AppError::validation("Driver PIN is required"));
    }
    Ok(())
}

/// GET /api/drivers - list all drivers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Driver>>> {
    let drivers = state.store.list_drivers().await?;
    Ok(Json(drivers))
}

/// GET /api/drivers/:id - fetch a single driver
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Driver>> {
    let driver = state
        .store
        .get_driver(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Driver {} not found", id)))?;
    Ok(Json(driver))
}

/// POST /api/drivers - create a driver (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DriverPayload>,
) -> AppResult<Json<Driver>> {
    validate(&payload)?;

    let driver = Driver {
        id: if payload.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            payload.id
        },
        name: payload.name,
        vehicle: payload.vehicle,
        pin: payload.pin,
    };

    let saved = state.store.upsert_driver(driver).await?;
    tracing::info!(driver_id = %saved.id, name = %saved.name, "Driver created");
    Ok(Json(saved))
}

/// PUT /api/drivers/:id - full replace (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DriverPayload>,
) -> AppResult<Json<Driver>> {
    validate(&payload)?;

    let driver = Driver {
        id,
        name: payload.name,
        vehicle: payload.vehicle,
        pin: payload.pin,
    };

    let saved = state.store.upsert_driver(driver).await?;
    Ok(Json(saved))
}

/// DELETE /api/drivers/:id - delete (admin)
///
/// Reports referencing this driver are left in place.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.store.delete_driver(&id).await?;
    if deleted {
        tracing::info!(driver_id = %id, "Driver deleted");
    }
    Ok(Json(deleted))
}
