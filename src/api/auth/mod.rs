//! Auth API module

mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/driver-login", post(handler::driver_login))
        .route("/admin-login", post(handler::admin_login))
}
