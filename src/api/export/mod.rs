//! Statement export API module

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/export", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/statement", get(handler::statement))
}
