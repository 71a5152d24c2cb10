use std::sync::Arc;

use crate::core::Config;
use crate::store::{FallbackStore, LedgerStore, LocalStore, RemoteTableStore};

/// Shared server state - configuration plus the persistence adapter
///
/// Cloning is cheap: the store is behind an `Arc` and handed to every
/// handler through axum's `State` extractor.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Persistence adapter (remote table service with local fallback)
    pub store: Arc<dyn LedgerStore>,
}

impl ServerState {
    pub fn new(config: Config, store: Arc<dyn LedgerStore>) -> Self {
        Self { config, store }
    }

    /// Initialize state for production use
    ///
    /// Opens the local fallback database under `{work_dir}/database` and
    /// builds the remote table client from the configured URL and key.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("ledger.redb");
        let local = LocalStore::open(&db_path)?;
        let remote = RemoteTableStore::new(
            config.table_api_url.clone(),
            config.table_api_key.clone(),
            config.request_timeout_ms,
            config.probe_timeout_ms,
        )?;
        let store = FallbackStore::new(remote, local);

        Ok(Self::new(config.clone(), Arc::new(store)))
    }
}
