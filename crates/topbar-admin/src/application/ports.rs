//! Ports: the traits application code depends on, and the plain descriptors
//! exchanged with the host.
//!
//! Production implementations of [`SettingsStore`] live in
//! `infrastructure::storage`; tests use the mockall-generated
//! `MockSettingsStore` / `MockHostRegistrar` or the in-memory store.

use std::path::PathBuf;

use thiserror::Error;
use topbar_core::StoredSettings;

/// Error type for settings persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing persistence cannot be reached.
    #[error("settings storage is unavailable: {0}")]
    Unavailable(String),

    /// The settings name cannot be used as a storage key.
    #[error("invalid settings name {0:?}")]
    InvalidName(String),

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored bytes could not be decoded into a record.
    #[error("failed to decode stored settings: {0}")]
    Decode(String),

    /// The record could not be encoded for storage.
    #[error("failed to encode settings: {0}")]
    Encode(String),
}

/// A single named settings slot.
///
/// `put` replaces the whole record atomically: a concurrent `get` observes
/// either the old record or the new one, never a mix.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStore {
    /// Returns the record stored under `name`, or `None` if nothing was saved yet.
    fn get(&self, name: &str) -> Result<Option<StoredSettings>, StoreError>;

    /// Replaces the record stored under `name`.
    fn put(&self, name: &str, record: &StoredSettings) -> Result<(), StoreError>;
}

/// Page-lifecycle points at which the host invokes the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// Admin menus are being built.
    AdminMenu,
    /// Admin screens are initialising; settings get registered here.
    AdminInit,
    /// `<head>` of a public page.
    PublicHead,
    /// `<head>` of an admin page.
    AdminHead,
    /// Admin scripts and styles are being queued.
    AdminEnqueueScripts,
}

/// Settings page the host should add to its admin menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsPage {
    pub page_title: String,
    pub menu_title: String,
    /// Capability a user must hold to reach the page.  Enforced by the host.
    pub capability: String,
    pub menu_slug: String,
}

/// Settings name the host should route form submissions for.
///
/// The host calls `TopBarControl::sanitize` on every submission targeting
/// `option_name` before persisting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRegistration {
    pub option_group: String,
    pub option_name: String,
}

/// Scripts and styles the host should load on the current admin screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetRequest {
    pub styles: Vec<String>,
    pub scripts: Vec<String>,
    /// `(handle, code)` pairs to attach after the named script.
    pub inline_scripts: Vec<(String, String)>,
}

/// The host's admin-menu registrar and settings-registration facility.
#[cfg_attr(test, mockall::automock)]
pub trait HostRegistrar {
    /// Asks the host to call back at `hook`.
    fn subscribe(&mut self, hook: HookPoint);

    /// Adds a page under the host's settings menu.
    fn add_options_page(&mut self, page: &OptionsPage);

    /// Registers a settings name with its sanitizing transform.
    fn register_setting(&mut self, setting: &SettingRegistration);
}
