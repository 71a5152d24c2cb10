//! Core module - server configuration, state and bootstrap
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - shared handles for handlers
//! - [`Server`] - HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
