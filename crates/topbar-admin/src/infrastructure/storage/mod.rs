//! Storage infrastructure: settings persistence and panel configuration.
//!
//! - `file_store` – [`SettingsStore`](crate::application::ports::SettingsStore)
//!   backed by one TOML file per settings name, replaced atomically.
//! - `memory` – in-process store with an availability switch, for hosts that
//!   keep options in memory and for exercising storage-outage paths.
//! - `config` – the panel's own configuration file.

pub mod config;
pub mod file_store;
pub mod memory;
