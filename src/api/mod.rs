//! API routing
//!
//! One module per screen of the application:
//!
//! - [`auth`] - driver PIN login, admin login
//! - [`drivers`] - driver profile management (admin screen)
//! - [`reports`] - daily report entry and review
//! - [`statistics`] - aggregated dashboard figures
//! - [`settings`] - admin credential
//! - [`export`] - PDF statement download
//! - [`health`] - liveness probe

pub mod auth;
pub mod drivers;
pub mod export;
pub mod health;
pub mod query;
pub mod reports;
pub mod settings;
pub mod statistics;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub use crate::utils::{AppError, AppResult};

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(drivers::router())
        .merge(reports::router())
        .merge(statistics::router())
        .merge(settings::router())
        .merge(export::router())
        .merge(health::router())
}

/// Fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - the browser frontend runs on a different origin
        .layer(CorsLayer::permissive())
        // Request tracing
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
