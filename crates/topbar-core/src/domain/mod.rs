//! Domain entities for Top Bar Control.
//!
//! This module contains pure business rules with no infrastructure
//! dependencies: what counts as a valid color, what a persisted settings
//! record may contain, and how missing values resolve to defaults.
//!
//! Code in outer layers (application, infrastructure, the host adapter)
//! depends on the domain, but the domain never depends on them.

/// Hex color validation and normalization.
pub mod color;

/// Persisted and resolved settings records.
pub mod settings;
