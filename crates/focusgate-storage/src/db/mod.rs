mod ai_config;
mod kv;


use anyhow::{Context, Result};
use rusqlite::Connection;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::migrations;
use crate::models::AiConfig;
use crate::store::StateStore;

/// SQLite-backed state store
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation, connection opening, or schema initialization fails
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = db_path.unwrap_or_else(Self::default_db_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let conn = Connection::open(&path).context("Failed to open database connection")?;
        migrations::init_schema(&conn)?;

        log::info!("Database initialized at: {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a throwaway in-memory database
    ///
    /// # Errors
    ///
    /// Returns an error if schema initialization fails
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        migrations::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn default_db_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("focusgate");
        path.push("focusgate.db");
        path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock database connection: {e}"))
    }

    /// Get remote evaluation settings (defaults if never saved)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub fn get_ai_config(&self) -> Result<AiConfig> {
        ai_config::get_ai_config(&*self.lock()?)
    }

    /// # Errors
    ///
    /// Returns an error if the write fails
    pub fn save_ai_config(&self, config: &AiConfig) -> Result<()> {
        ai_config::save_ai_config(&*self.lock()?, config)
    }

    /// Update a single field of the remote evaluation settings
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, invalid values, or a failed write
    pub fn update_ai_config_field(&self, key: &str, value: Option<&str>) -> Result<()> {
        ai_config::update_ai_config_field(&*self.lock()?, key, value)
    }
}

impl StateStore for Database {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        kv::get_value(&*self.lock()?, key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        kv::set_value(&*self.lock()?, key, &value)
    }
}
