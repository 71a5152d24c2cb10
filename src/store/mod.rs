//! Persistence adapter
//!
//! Three logical tables back the application: `drivers`, `daily_reports`
//! and `app_settings` (single key `admin_pwd`). [`LedgerStore`] exposes one
//! method per entity operation; two backends implement it:
//!
//! - [`RemoteTableStore`] - the managed table service (primary)
//! - [`LocalStore`] - on-device redb fallback, whole-collection blobs
//!
//! [`FallbackStore`] composes the two, picking a backend with a
//! connectivity probe instead of catching exceptions inline.

pub mod fallback;
pub mod local;
pub mod remote;

pub use fallback::FallbackStore;
pub use local::LocalStore;
pub use remote::RemoteTableStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DailyReport, Driver};

/// Default admin credential when no `admin_pwd` setting exists anywhere
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Remote table service error: {0}")]
    Remote(String),

    #[error("Local database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Remote(err.to_string())
    }
}

impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// One method per entity operation
///
/// All mutations are upserts (insert-or-replace by id) or deletes by id;
/// there is no partial update. Saving an entity twice leaves one record.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    // === Drivers ===
    async fn list_drivers(&self) -> StoreResult<Vec<Driver>>;
    async fn get_driver(&self, id: &str) -> StoreResult<Option<Driver>>;
    async fn upsert_driver(&self, driver: Driver) -> StoreResult<Driver>;
    async fn delete_driver(&self, id: &str) -> StoreResult<bool>;

    // === Daily reports ===
    async fn list_reports(&self) -> StoreResult<Vec<DailyReport>>;
    async fn get_report(&self, id: &str) -> StoreResult<Option<DailyReport>>;
    async fn upsert_report(&self, report: DailyReport) -> StoreResult<DailyReport>;
    async fn delete_report(&self, id: &str) -> StoreResult<bool>;

    // === Admin credential (app settings, key "admin_pwd") ===
    async fn admin_password(&self) -> StoreResult<String>;
    async fn set_admin_password(&self, password: &str) -> StoreResult<()>;
}
