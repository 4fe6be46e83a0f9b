
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::{FocusAreas, FocusState, SiteToggles};

pub const FOCUS_MODE_KEY: &str = "focusMode";
pub const FOCUS_AREAS_KEY: &str = "focusAreas";
pub const SITE_TOGGLES_KEY: &str = "siteToggles";

/// Key-value storage holding the focus-mode state
///
/// Implementors only provide `get` and `set`; the typed accessors are shared.
pub trait StateStore: Send + Sync {
    /// Read a raw value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write a raw value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Read a full snapshot. Undecodable values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backing store itself fails.
    fn load(&self) -> Result<FocusState> {
        let focus_mode = self
            .get(FOCUS_MODE_KEY)?
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let focus_areas = match self.get(FOCUS_AREAS_KEY)? {
            Some(value) => serde_json::from_value::<FocusAreas>(value).unwrap_or_else(|e| {
                log::warn!("Stored focus areas are malformed, using none: {e}");
                FocusAreas::new()
            }),
            None => FocusAreas::new(),
        };

        let site_toggles = match self.get(SITE_TOGGLES_KEY)? {
            Some(value) => serde_json::from_value::<SiteToggles>(value).unwrap_or_else(|e| {
                log::warn!("Stored site toggles are malformed, using none: {e}");
                SiteToggles::new()
            }),
            None => SiteToggles::new(),
        };

        Ok(FocusState {
            focus_mode,
            focus_areas,
            site_toggles,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set_focus_mode(&self, focus_mode: bool) -> Result<()> {
        self.set(FOCUS_MODE_KEY, Value::Bool(focus_mode))
    }

    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set_focus_areas(&self, areas: &FocusAreas) -> Result<()> {
        let value = serde_json::to_value(areas).context("Failed to encode focus areas")?;
        self.set(FOCUS_AREAS_KEY, value)
    }

    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set_site_toggles(&self, toggles: &SiteToggles) -> Result<()> {
        let value = serde_json::to_value(toggles).context("Failed to encode site toggles")?;
        self.set(SITE_TOGGLES_KEY, value)
    }

    /// First-install setup: write `focusMode = false` unless already present.
    /// Returns whether anything was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    fn initialize_defaults(&self) -> Result<bool> {
        if self.get(FOCUS_MODE_KEY)?.is_some() {
            return Ok(false);
        }
        self.set_focus_mode(false)?;
        Ok(true)
    }
}

/// Load a snapshot, logging storage failures and using defaults instead
pub fn load_or_default(store: &dyn StateStore) -> FocusState {
    store.load().unwrap_or_else(|e| {
        log::error!("Failed to read focus state, using defaults: {e:#}");
        FocusState::default()
    })
}

/// Volatile store, used by tests and one-shot CLI evaluations
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with a full snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded.
    pub fn with_state(state: &FocusState) -> Result<Self> {
        let store = Self::new();
        store.set_focus_mode(state.focus_mode)?;
        store.set_focus_areas(&state.focus_areas)?;
        store.set_site_toggles(&state.site_toggles)?;
        Ok(store)
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self
            .values
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock memory store: {e}"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock memory store: {e}"))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}
