//! topbar-admin library entry point.
//!
//! Wires the pure `topbar-core` types to persistence and to the host's
//! admin screens and page-render hooks.
//!
//! # Architecture
//!
//! ```text
//! host (menu registrar, settings facility, head hooks, asset pipeline)
//!         ↕
//! [topbar-admin]
//!   ├── application/      Use cases: sanitize, read, save, hook dispatch
//!   │     └── ports       SettingsStore / HostRegistrar traits
//!   └── infrastructure/
//!         ├── storage/    TOML file store, in-memory store, panel config
//!         └── logging     tracing subscriber setup
//!         ↕
//! [topbar-core]           HexColor, StoredSettings, SettingsRecord, renderers
//! ```

pub mod application;
pub mod infrastructure;
