//! Infrastructure layer for Top Bar Control.
//!
//! Contains the adapters that touch the outside world: settings persistence,
//! panel configuration files and log output.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `topbar_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod logging;
pub mod storage;
