//! In-memory settings store.
//!
//! Keeps records in a process-local map.  [`MemorySettingsStore::set_available`]
//! simulates the backing persistence going away: while unavailable, both
//! `get` and `put` report [`StoreError::Unavailable`] and nothing changes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use topbar_core::StoredSettings;

use crate::application::ports::{SettingsStore, StoreError};

/// A [`SettingsStore`] held entirely in memory.
#[derive(Debug)]
pub struct MemorySettingsStore {
    records: Mutex<HashMap<String, StoredSettings>>,
    available: AtomicBool,
}

impl MemorySettingsStore {
    /// Creates an empty, available store.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Switches simulated availability on or off.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory store switched off".to_string(),
            ))
        }
    }

    fn records(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, StoredSettings>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("settings lock poisoned".to_string()))
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, name: &str) -> Result<Option<StoredSettings>, StoreError> {
        self.check_available()?;
        Ok(self.records()?.get(name).cloned())
    }

    fn put(&self, name: &str, record: &StoredSettings) -> Result<(), StoreError> {
        self.check_available()?;
        self.records()?.insert(name.to_string(), record.clone());
        Ok(())
    }
}
