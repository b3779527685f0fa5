//! Settings reader.
//!
//! [`read_settings`] is total: a missing record, a partial record and an
//! unreachable store all resolve to a fully-populated [`SettingsRecord`], so
//! the page-render paths that call it can never break.

use topbar_core::SettingsRecord;
use tracing::{debug, warn};

use super::ports::SettingsStore;

/// Reads the record stored under `name` and fills every gap with defaults.
pub fn read_settings(store: &dyn SettingsStore, name: &str) -> SettingsRecord {
    match store.get(name) {
        Ok(Some(stored)) => SettingsRecord::resolve(Some(&stored)),
        Ok(None) => {
            debug!("no settings stored under {name:?}; using defaults");
            SettingsRecord::default()
        }
        Err(e) => {
            warn!("failed to read settings {name:?}, falling back to defaults: {e}");
            SettingsRecord::default()
        }
    }
}
