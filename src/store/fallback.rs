//! Backend selection with a connectivity probe
//!
//! Every operation first asks whether the table service is reachable
//! (probe result cached briefly to keep chatty screens cheap). Reachable:
//! the call runs remotely. Unreachable, or a remote call that fails after
//! a good probe: the call is downgraded to the local store with a warning
//! log and no user-visible difference. Last writer wins at whichever layer
//! answered; there is no reconciliation between the two.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{LedgerStore, LocalStore, RemoteTableStore, StoreResult, DEFAULT_ADMIN_PASSWORD};
use crate::models::{DailyReport, Driver};

/// How long one probe result stays valid
const PROBE_CACHE_TTL: Duration = Duration::from_secs(5);

/// Remote-first store with a local fallback
pub struct FallbackStore {
    remote: RemoteTableStore,
    local: LocalStore,
    probe_cache: Mutex<Option<(Instant, bool)>>,
}

impl FallbackStore {
    pub fn new(remote: RemoteTableStore, local: LocalStore) -> Self {
        Self {
            remote,
            local,
            probe_cache: Mutex::new(None),
        }
    }

    /// Probe the remote service, reusing a recent result
    async fn online(&self) -> bool {
        let mut cache = self.probe_cache.lock().await;
        if let Some((at, online)) = *cache {
            if at.elapsed() < PROBE_CACHE_TTL {
                return online;
            }
        }
        let online = self.remote.is_reachable().await;
        if !online {
            tracing::warn!("Table service unreachable, operating on local fallback");
        }
        *cache = Some((Instant::now(), online));
        online
    }
}

/// Run the op remotely when online, otherwise (or on remote failure)
/// against the local store.
macro_rules! with_fallback {
    ($self:ident, $op:literal, $call:expr, $fallback:expr) => {{
        if $self.online().await {
            match $call {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(op = $op, error = %e, "Remote call failed, using local fallback");
                }
            }
        }
        $fallback
    }};
}

#[async_trait]
impl LedgerStore for FallbackStore {
    async fn list_drivers(&self) -> StoreResult<Vec<Driver>> {
        with_fallback!(
            self,
            "list_drivers",
            self.remote.list_drivers().await,
            self.local.list_drivers().await
        )
    }

    async fn get_driver(&self, id: &str) -> StoreResult<Option<Driver>> {
        with_fallback!(
            self,
            "get_driver",
            self.remote.get_driver(id).await,
            self.local.get_driver(id).await
        )
    }

    async fn upsert_driver(&self, driver: Driver) -> StoreResult<Driver> {
        with_fallback!(
            self,
            "upsert_driver",
            self.remote.upsert_driver(driver.clone()).await,
            self.local.upsert_driver(driver).await
        )
    }

    async fn delete_driver(&self, id: &str) -> StoreResult<bool> {
        with_fallback!(
            self,
            "delete_driver",
            self.remote.delete_driver(id).await,
            self.local.delete_driver(id).await
        )
    }

    async fn list_reports(&self) -> StoreResult<Vec<DailyReport>> {
        with_fallback!(
            self,
            "list_reports",
            self.remote.list_reports().await,
            self.local.list_reports().await
        )
    }

    async fn get_report(&self, id: &str) -> StoreResult<Option<DailyReport>> {
        with_fallback!(
            self,
            "get_report",
            self.remote.get_report(id).await,
            self.local.get_report(id).await
        )
    }

    async fn upsert_report(&self, report: DailyReport) -> StoreResult<DailyReport> {
        with_fallback!(
            self,
            "upsert_report",
            self.remote.upsert_report(report.clone()).await,
            self.local.upsert_report(report).await
        )
    }

    async fn delete_report(&self, id: &str) -> StoreResult<bool> {
        with_fallback!(
            self,
            "delete_report",
            self.remote.delete_report(id).await,
            self.local.delete_report(id).await
        )
    }

    async fn admin_password(&self) -> StoreResult<String> {
        if self.online().await {
            match self.remote.admin_password().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(op = "admin_password", error = %e, "Remote call failed, using local fallback");
                }
            }
        }
        // The local store already defaults; guard the hardcoded default
        // here too in case the local database itself is broken.
        Ok(self
            .local
            .admin_password()
            .await
            .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()))
    }

    async fn set_admin_password(&self, password: &str) -> StoreResult<()> {
        with_fallback!(
            self,
            "set_admin_password",
            self.remote.set_admin_password(password).await,
            self.local.set_admin_password(password).await
        )
    }
}
