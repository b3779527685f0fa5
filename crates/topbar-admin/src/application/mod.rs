//! Application layer use cases for Top Bar Control.
//!
//! Use cases in this layer orchestrate `topbar-core` domain types and talk to
//! persistence and the host only through the traits in [`ports`], so the
//! infrastructure can be swapped (or faked in tests) without touching them.
//!
//! # Sub-modules
//!
//! - **`ports`** – `SettingsStore` and `HostRegistrar` traits plus the
//!   descriptors handed to the host.
//!
//! - **`sanitize_settings`** – Projects an untrusted submission onto the two
//!   recognized color fields, dropping anything that fails validation.
//!
//! - **`read_settings`** – Loads the stored record and resolves it against the
//!   documented defaults.  Never fails.
//!
//! - **`save_settings`** – Sanitize, merge against the previous record (or
//!   replace it), persist.
//!
//! - **`plugin`** – `TopBarControl`: host registration and hook dispatch.

pub mod plugin;
pub mod ports;
pub mod read_settings;
pub mod sanitize_settings;
pub mod save_settings;
