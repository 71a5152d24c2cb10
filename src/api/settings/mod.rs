//! Settings API module

mod handler;

use axum::{routing::put, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/admin-password", put(handler::update_admin_password))
}
