//! # topbar-core
//!
//! Shared library for Top Bar Control containing the color validator, the
//! settings records and the markup renderers.
//!
//! This crate has no I/O: it never touches the file system, the host's option
//! storage or its hook system.  Everything here is a pure function of its
//! inputs, so it can be tested without any host at all.
//!
//! # Overview
//!
//! Top Bar Control lets a site operator choose a background and a foreground
//! color for the persistent navigation bar.  The same background color is
//! also advertised to browsers through a `theme-color` meta tag.
//!
//! - **`domain`** – The [`HexColor`] validator, the partial persisted record
//!   ([`StoredSettings`]) and the fully-resolved record handed to renderers
//!   ([`SettingsRecord`]).
//!
//! - **`render`** – Turns a [`SettingsRecord`] into markup: the meta tag, the
//!   bar style block and the settings form.  All interpolated values are
//!   HTML-escaped by the templates.

pub mod domain;
pub mod render;

pub use domain::color::{validate, ColorError, HexColor};
pub use domain::settings::{
    ColorField, SettingsRecord, StoredSettings, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND,
};
pub use render::{
    render_bar_style, render_form, render_theme_color, FormContext, RenderError,
};
