//! TOML-based configuration for the panel itself.
//!
//! Read from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\TopBarControl\config.toml`
//! - Linux:    `~/.config/topbar-control/config.toml`
//! - macOS:    `~/Library/Application Support/TopBarControl/config.toml`
//!
//! ```toml
//! [panel]
//! option_name = "wtbc_settings"
//! merge_policy = "merge"
//! log_level = "info"
//!
//! [storage]
//! data_dir = "/var/lib/topbar-control"
//! ```
//!
//! Every field has a `#[serde(default = ...)]`, so a missing file, a missing
//! section or a missing key all fall back to the documented defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::file_store::FileSettingsStore;
use crate::application::plugin::PluginOptions;
use crate::application::save_settings::MergePolicy;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level panel configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PanelConfig {
    #[serde(default)]
    pub panel: PanelSection,
    #[serde(default)]
    pub storage: StorageSection,
    /// Directory of the file this config was loaded from, if any.
    #[serde(skip)]
    pub source_dir: Option<PathBuf>,
}

/// Identity of the panel as registered with the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelSection {
    /// Name of the persisted settings slot.
    #[serde(default = "default_option_name")]
    pub option_name: String,
    #[serde(default = "default_page_title")]
    pub page_title: String,
    #[serde(default = "default_menu_title")]
    pub menu_title: String,
    #[serde(default = "default_menu_slug")]
    pub menu_slug: String,
    /// Capability the host requires for the settings page.
    #[serde(default = "default_capability")]
    pub capability: String,
    /// `"merge"` keeps previous values for rejected fields; `"replace"` does not.
    #[serde(default)]
    pub merge_policy: MergePolicy,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where settings records are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageSection {
    /// Directory for settings files.  Defaults to `data/` beside the config file;
    /// a relative path is taken relative to the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_option_name() -> String {
    "wtbc_settings".to_string()
}
fn default_page_title() -> String {
    "WP Top Bar Control".to_string()
}
fn default_menu_title() -> String {
    "Top Bar Control".to_string()
}
fn default_menu_slug() -> String {
    "wp-top-bar-control".to_string()
}
fn default_capability() -> String {
    "manage_options".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PanelSection {
    fn default() -> Self {
        Self {
            option_name: default_option_name(),
            page_title: default_page_title(),
            menu_title: default_menu_title(),
            menu_slug: default_menu_slug(),
            capability: default_capability(),
            merge_policy: MergePolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl PanelConfig {
    /// Options for constructing a `TopBarControl`.
    pub fn plugin_options(&self) -> PluginOptions {
        PluginOptions {
            option_name: self.panel.option_name.clone(),
            page_title: self.panel.page_title.clone(),
            menu_title: self.panel.menu_title.clone(),
            menu_slug: self.panel.menu_slug.clone(),
            capability: self.panel.capability.clone(),
            merge_policy: self.panel.merge_policy,
        }
    }

    /// Resolves the settings data directory against the directory of the
    /// config file this was loaded from, or the platform config directory
    /// when it was not loaded from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformConfigDir`] when the path is not
    /// absolute, there is no source directory and the platform directory
    /// cannot be determined.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.storage.data_dir {
            if dir.is_absolute() {
                return Ok(dir.clone());
            }
        }
        let base = match &self.source_dir {
            Some(dir) => dir.clone(),
            None => config_dir()?,
        };
        Ok(match &self.storage.data_dir {
            Some(dir) => base.join(dir),
            None => base.join("data"),
        })
    }

    /// Opens the file store the configuration points at.
    ///
    /// # Errors
    ///
    /// See [`PanelConfig::data_dir`].
    pub fn open_store(&self) -> Result<FileSettingsStore, ConfigError> {
        Ok(FileSettingsStore::new(self.data_dir()?))
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `PanelConfig` from the platform config file, returning defaults if
/// the file does not exist yet.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<PanelConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `PanelConfig` from `path`, returning defaults if it does not exist.
///
/// Either way the result remembers the directory of `path`, so the default
/// data directory sits beside that file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<PanelConfig, ConfigError> {
    let mut cfg: PanelConfig = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => PanelConfig::default(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    cfg.source_dir = path.parent().map(Path::to_path_buf);
    Ok(cfg)
}

/// Resolves the platform config directory, including the `TopBarControl` part.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("TopBarControl"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("topbar-control"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("TopBarControl")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
