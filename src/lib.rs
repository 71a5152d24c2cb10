//! Fleet Ledger - bookkeeping service for a taxi fleet operator
//!
//! # Architecture
//!
//! Drivers log in with a PIN and file daily income/expense reports; an
//! administrator reviews aggregated figures, manages driver profiles and
//! exports PDF statements. The server is a thin JSON API over three pieces:
//!
//! - **Ledger core** (`ledger`): amount parsing, derived totals, date-range
//!   filtering, summary aggregation. Pure functions, no IO.
//! - **Persistence adapter** (`store`): one trait, two backends - the managed
//!   table service (remote) and an on-device redb fallback - selected by a
//!   connectivity probe.
//! - **API** (`api`): one axum router per screen of the original application.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/     # config, state, HTTP server
//! ├── models/   # Driver, DailyReport, breakdowns
//! ├── ledger/   # money parsing, totals, filter, summary
//! ├── store/    # LedgerStore trait, remote/local/fallback backends
//! ├── api/      # HTTP routes and handlers
//! ├── pdf/      # statement exporter (Typst CLI)
//! └── utils/    # errors, logging, time
//! ```

pub mod api;
pub mod core;
pub mod ledger;
pub mod models;
pub mod pdf;
pub mod store;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use store::{FallbackStore, LedgerStore, LocalStore, RemoteTableStore};
pub use utils::{AppError, AppResult};

/// Load .env and initialize logging. Call once at process start.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        log_dir.as_deref(),
    );
}

pub fn print_banner() {
    println!(
        r#"
    ______    __               __
   / ____/   / /___  ___  ____/ /_
  / /_      / / __ \/ _ \/ __  __/
 / __/     / / /_/ /  __/ /_/ /_
/_/  ______/_\____/\___/\__,\__/
    / /   ___  ____/ /___ ____  _____
   / /   / _ \/ __  / __ `/ _ \/ ___/
  / /___/  __/ /_/ / /_/ /  __/ /
 /_____/\___/\__,_/\__, /\___/_/
                  /____/
    "#
    );
}
