//! redb-backed fallback store
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `collections` | `"drivers"` / `"daily_reports"` | JSON array blob |
//! | `settings` | `"admin_pwd"` | plain string |
//!
//! Each collection lives in a single serialized blob, rewritten atomically
//! per mutation. redb commits with `Durability::Immediate`, so the file is
//! always in a consistent state even across power loss.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{LedgerStore, StoreResult, DEFAULT_ADMIN_PASSWORD};
use crate::models::{DailyReport, Driver};

/// Whole-collection blobs: key = collection name, value = JSON array
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// App settings: key = setting name, value = string
const SETTINGS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("settings");

const DRIVERS_KEY: &str = "drivers";
const REPORTS_KEY: &str = "daily_reports";
const ADMIN_PWD_KEY: &str = "admin_pwd";

/// On-device fallback store backed by redb
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
}

impl LocalStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
            let _ = write_txn.open_table(SETTINGS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
            let _ = write_txn.open_table(SETTINGS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        match table.get(key)? {
            Some(guard) => Ok(serde_json::from_slice(guard.value())?),
            None => Ok(Vec::new()),
        }
    }

    fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> StoreResult<()> {
        let blob = serde_json::to_vec(items)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(key, blob.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Insert-or-replace by id within a collection blob
    fn upsert_in<T, F>(&self, key: &str, item: T, same_id: F) -> StoreResult<T>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: Fn(&T) -> bool,
    {
        let mut items: Vec<T> = self.load_collection(key)?;
        match items.iter_mut().find(|i| same_id(i)) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        self.save_collection(key, &items)?;
        Ok(item)
    }

    /// Remove by id, returning whether anything was removed
    fn delete_in<T, F>(&self, key: &str, same_id: F) -> StoreResult<bool>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let mut items: Vec<T> = self.load_collection(key)?;
        let before = items.len();
        items.retain(|i| !same_id(i));
        if items.len() == before {
            return Ok(false);
        }
        self.save_collection(key, &items)?;
        Ok(true)
    }
}

#[async_trait]
impl LedgerStore for LocalStore {
    async fn list_drivers(&self) -> StoreResult<Vec<Driver>> {
        self.load_collection(DRIVERS_KEY)
    }

    async fn get_driver(&self, id: &str) -> StoreResult<Option<Driver>> {
        let drivers: Vec<Driver> = self.load_collection(DRIVERS_KEY)?;
        Ok(drivers.into_iter().find(|d| d.id == id))
    }

    async fn upsert_driver(&self, driver: Driver) -> StoreResult<Driver> {
        let id = driver.id.clone();
        self.upsert_in(DRIVERS_KEY, driver, |d: &Driver| d.id == id)
    }

    async fn delete_driver(&self, id: &str) -> StoreResult<bool> {
        self.delete_in(DRIVERS_KEY, |d: &Driver| d.id == id)
    }

    async fn list_reports(&self) -> StoreResult<Vec<DailyReport>> {
        self.load_collection(REPORTS_KEY)
    }

    async fn get_report(&self, id: &str) -> StoreResult<Option<DailyReport>> {
        let reports: Vec<DailyReport> = self.load_collection(REPORTS_KEY)?;
        Ok(reports.into_iter().find(|r| r.id == id))
    }

    async fn upsert_report(&self, report: DailyReport) -> StoreResult<DailyReport> {
        let id = report.id.clone();
        self.upsert_in(REPORTS_KEY, report, |r: &DailyReport| r.id == id)
    }

    async fn delete_report(&self, id: &str) -> StoreResult<bool> {
        self.delete_in(REPORTS_KEY, |r: &DailyReport| r.id == id)
    }

    async fn admin_password(&self) -> StoreResult<String> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS_TABLE)?;
        Ok(table
            .get(ADMIN_PWD_KEY)?
            .map(|guard| guard.value().to_string())
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()))
    }

    async fn set_admin_password(&self, password: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SETTINGS_TABLE)?;
            table.insert(ADMIN_PWD_KEY, password)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
