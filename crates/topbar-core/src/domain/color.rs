//! Hex color values.
//!
//! A [`HexColor`] can only be obtained through [`validate`] (or the
//! equivalent `FromStr` / `TryFrom<String>` impls), so holding one is proof
//! that the value is a normalized `#rrggbb` string.
//!
//! Accepted input is `#` followed by exactly 3 or 6 hex digits, in any case.
//! The short form is expanded (`#fA0` → `#ffaa00`) and the result is always
//! lowercase.  Surrounding whitespace is **not** trimmed: `" #fff"` is
//! rejected just like any other malformed value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a raw value was rejected by [`validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ColorError {
    /// No value was supplied at all.
    #[error("no color value supplied")]
    Missing,

    /// The value was the empty string.
    #[error("color value is empty")]
    Empty,

    /// The value does not start with `#`.
    #[error("color value must start with '#'")]
    MissingHash,

    /// A character after the `#` is not a hex digit.
    #[error("invalid hex digit {0:?} in color value")]
    NonHexDigit(char),

    /// The number of hex digits is neither 3 nor 6.
    #[error("expected 3 or 6 hex digits, found {0}")]
    WrongLength(usize),
}

/// A validated color in normalized `#rrggbb` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Returns the normalized `#rrggbb` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the color and returns the normalized string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validates a raw, untrusted value and normalizes it to `#rrggbb`.
///
/// Total function: every input maps to either a [`HexColor`] or a
/// [`ColorError`]; it never panics.
///
/// # Examples
///
/// ```
/// use topbar_core::validate;
///
/// assert_eq!(validate(Some("#ABC")).unwrap().as_str(), "#aabbcc");
/// assert!(validate(Some("abc")).is_err());
/// assert!(validate(None).is_err());
/// ```
pub fn validate(raw: Option<&str>) -> Result<HexColor, ColorError> {
    let raw = raw.ok_or(ColorError::Missing)?;
    if raw.is_empty() {
        return Err(ColorError::Empty);
    }
    let digits = raw.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::NonHexDigit(bad));
    }

    // Only ASCII hex digits remain, so the byte length is the digit count.
    let normalized: String = match digits.len() {
        3 => digits
            .chars()
            .flat_map(|c| [c, c])
            .map(|c| c.to_ascii_lowercase())
            .collect(),
        6 => digits.to_ascii_lowercase(),
        n => return Err(ColorError::WrongLength(n)),
    };

    Ok(HexColor(format!("#{normalized}")))
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(Some(s))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(Some(&value))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
