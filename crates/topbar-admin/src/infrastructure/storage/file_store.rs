//! TOML file-backed settings store.
//!
//! Each settings name maps to `<dir>/<name>.toml`:
//!
//! ```toml
//! background_color = "#23282d"
//! foreground_color = "#ffffff"
//! ```
//!
//! Writes go to a uniquely named temporary file in the same directory which
//! is then renamed over the target.  A rename within one directory is atomic,
//! so readers see either the previous record or the new one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use topbar_core::StoredSettings;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{SettingsStore, StoreError};

/// Settings store keeping one TOML file per settings name.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    dir: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store rooted at `dir`.  The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves the file for `name`, refusing names that could escape `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidName`] unless `name` is non-empty ASCII
    /// alphanumerics, `_` or `-`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.toml")))
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, name: &str) -> Result<Option<StoredSettings>, StoreError> {
        let path = self.path_for(name)?;

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings file at {}", path.display());
                return Ok(None);
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn put(&self, name: &str, record: &StoredSettings) -> Result<(), StoreError> {
        let path = self.path_for(name)?;

        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let content =
            toml::to_string_pretty(record).map_err(|e| StoreError::Encode(e.to_string()))?;

        let tmp = self.dir.join(format!(".{name}.{}.tmp", Uuid::new_v4()));
        if let Err(source) = write_synced(&tmp, content.as_bytes()) {
            remove_stale(&tmp);
            return Err(StoreError::Io { path: tmp, source });
        }
        if let Err(source) = fs::rename(&tmp, &path) {
            remove_stale(&tmp);
            return Err(StoreError::Io { path, source });
        }

        debug!("wrote settings to {}", path.display());
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn remove_stale(tmp: &Path) {
    if let Err(e) = fs::remove_file(tmp) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("could not remove temporary file {}: {e}", tmp.display());
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
