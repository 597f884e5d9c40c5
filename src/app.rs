//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! All services are initialized here and made available through App.

use crate::config;
use crate::error::Result;
use crate::services::{
    AccountService, ExpenseService, PaymentService, ReportService, SchoolService, StudentService,
};
use crate::store::{self, RecordStore};
use sqlx::SqlitePool;
use std::path::PathBuf;

/// Central application state holding all services
#[derive(Clone)]
pub struct App {
    pub students: StudentService,
    pub payments: PaymentService,
    pub expenses: ExpenseService,
    pub reports: ReportService,
    pub accounts: AccountService,
    pub school: SchoolService,
}

impl App {
    /// Build the service set over an initialized pool
    pub fn new(pool: SqlitePool) -> Self {
        let store = RecordStore::new(pool);

        Self {
            students: StudentService::new(store.clone()),
            payments: PaymentService::new(store.clone()),
            expenses: ExpenseService::new(store.clone()),
            reports: ReportService::new(store.clone()),
            accounts: AccountService::new(store.clone()),
            school: SchoolService::new(store),
        }
    }

    /// Application setup - called once on startup.
    ///
    /// Opens (and migrates) the database under the resolved data
    /// directory, then builds the services.
    pub async fn init() -> Result<Self> {
        tracing::info!("Initializing application");

        let data_dir = data_dir();
        tracing::info!("Data directory: {:?}", data_dir);

        std::fs::create_dir_all(&data_dir)?;

        let pool = store::create_pool(&data_dir.join(config::DATABASE_FILE)).await?;

        tracing::info!("Application initialized successfully");

        Ok(Self::new(pool))
    }
}

/// Resolve the data directory: the override variable when set,
/// otherwise `.edufinance` under the user's home.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(config::DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(config::DEFAULT_DATA_DIR)
}
