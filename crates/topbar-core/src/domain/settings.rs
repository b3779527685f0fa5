//! Settings records.
//!
//! Two shapes of the same data exist:
//!
//! - [`StoredSettings`] is what gets persisted.  Either field may be absent,
//!   but any field that is present holds a validated [`HexColor`].
//! - [`SettingsRecord`] is what renderers consume.  Both fields are always
//!   populated; absent stored fields resolve to [`DEFAULT_BACKGROUND`] and
//!   [`DEFAULT_FOREGROUND`].

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::color::{validate, HexColor};

/// Background color used when none has been saved.
pub const DEFAULT_BACKGROUND: &str = "#23282d";

/// Foreground color used when none has been saved.
pub const DEFAULT_FOREGROUND: &str = "#ffffff";

/// The two configurable colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorField {
    /// Bar background, also advertised as the `theme-color` hint.
    Background,
    /// Bar text and icons.
    Foreground,
}

impl ColorField {
    /// Both fields, in form order.
    pub const ALL: [ColorField; 2] = [ColorField::Background, ColorField::Foreground];

    /// Key used in submitted payloads and in the persisted record.
    pub fn key(self) -> &'static str {
        match self {
            ColorField::Background => "background_color",
            ColorField::Foreground => "foreground_color",
        }
    }

    /// Documented default for this field.
    pub fn default_color(self) -> &'static str {
        match self {
            ColorField::Background => DEFAULT_BACKGROUND,
            ColorField::Foreground => DEFAULT_FOREGROUND,
        }
    }

    /// Looks a field up by its payload key.
    pub fn from_key(key: &str) -> Option<ColorField> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

// ── Persisted record ──────────────────────────────────────────────────────────

/// The persisted settings record.  Fields may be absent, never malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_color"
    )]
    pub background_color: Option<HexColor>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_color"
    )]
    pub foreground_color: Option<HexColor>,
}

impl StoredSettings {
    /// Returns the stored value for `field`, if any.
    pub fn get(&self, field: ColorField) -> Option<&HexColor> {
        match field {
            ColorField::Background => self.background_color.as_ref(),
            ColorField::Foreground => self.foreground_color.as_ref(),
        }
    }

    /// Replaces the stored value for `field`.
    pub fn set(&mut self, field: ColorField, value: Option<HexColor>) {
        match field {
            ColorField::Background => self.background_color = value,
            ColorField::Foreground => self.foreground_color = value,
        }
    }

    /// Returns `true` when neither field is present.
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none() && self.foreground_color.is_none()
    }

    /// Overlays the fields present in `self` onto `previous`.
    ///
    /// Fields absent from `self` keep their previous value, so a submission
    /// that only carries one valid color does not erase the other.
    pub fn merged_onto(self, previous: &StoredSettings) -> StoredSettings {
        StoredSettings {
            background_color: self
                .background_color
                .or_else(|| previous.background_color.clone()),
            foreground_color: self
                .foreground_color
                .or_else(|| previous.foreground_color.clone()),
        }
    }
}

/// Any stored value, whether or not it is a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStoredValue {
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Re-validates a stored field.  Malformed values are dropped so a tampered
/// record still decodes with the valid-or-absent guarantee intact.
fn lenient_color<'de, D>(deserializer: D) -> Result<Option<HexColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawStoredValue>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(RawStoredValue::Text(text)) => match validate(Some(&text)) {
            Ok(color) => Some(color),
            Err(e) => {
                warn!("dropping invalid stored color {text:?}: {e}");
                None
            }
        },
        Some(RawStoredValue::Other(_)) => {
            warn!("dropping non-string stored color value");
            None
        }
    })
}

// ── Resolved record ───────────────────────────────────────────────────────────

/// Fully-populated settings handed to renderers.
///
/// Values produced by [`SettingsRecord::resolve`] are always normalized hex
/// colors.  The fields stay plain strings so renderers treat them as
/// untrusted text and escape them regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsRecord {
    pub background_color: String,
    pub foreground_color: String,
}

impl SettingsRecord {
    /// Resolves a possibly-missing, possibly-partial stored record, filling
    /// every absent field with its documented default.
    pub fn resolve(stored: Option<&StoredSettings>) -> SettingsRecord {
        let pick = |field: ColorField| {
            stored
                .and_then(|s| s.get(field))
                .map(|color| color.as_str().to_string())
                .unwrap_or_else(|| field.default_color().to_string())
        };

        SettingsRecord {
            background_color: pick(ColorField::Background),
            foreground_color: pick(ColorField::Foreground),
        }
    }

    /// Returns the resolved value for `field`.
    pub fn get(&self, field: ColorField) -> &str {
        match field {
            ColorField::Background => &self.background_color,
            ColorField::Foreground => &self.foreground_color,
        }
    }
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self::resolve(None)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
