//! Settings sanitizer.
//!
//! A submission arrives as an untyped key/value mapping.  [`sanitize`]
//! projects it onto the two recognized color fields and validates each one
//! independently:
//!
//! - valid value   → normalized and kept
//! - invalid value → dropped (the rest of the submission still saves)
//! - unknown key   → ignored
//!
//! The raw mapping never travels past this module.

use std::collections::HashMap;

use serde_json::Value;
use topbar_core::{validate, ColorError, ColorField, StoredSettings};
use tracing::debug;

/// Untrusted form submission: field name → submitted value (if any).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedPayload {
    entries: HashMap<String, Option<String>>,
}

impl SubmittedPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one submitted field.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.insert(key.into(), value);
    }

    /// Returns `None` when `key` was not submitted, `Some(None)` when it was
    /// submitted without a value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|value| value.as_deref())
    }

    /// Number of submitted fields, recognized or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a payload from a JSON object.
    ///
    /// String members keep their value; any other member type is treated as
    /// submitted-without-value.  A non-object yields an empty payload.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            debug!("ignoring non-object settings payload");
            return Self::new();
        };

        object
            .iter()
            .map(|(key, member)| (key.clone(), member.as_str().map(str::to_string)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for SubmittedPayload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        }
    }
}

/// A submitted field that failed validation and was left out of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedField {
    pub field: ColorField,
    pub error: ColorError,
}

/// Result of sanitizing one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Record containing only the fields that validated.
    pub record: StoredSettings,
    /// Fields that were submitted but rejected, in form order.
    pub rejected: Vec<RejectedField>,
}

/// Sanitizes a submission into a record safe to hand to a `SettingsStore`.
///
/// Fields absent from `payload` are absent from the result; so are fields
/// whose value fails validation.
pub fn sanitize(payload: &SubmittedPayload) -> StoredSettings {
    sanitize_with_report(payload).record
}

/// Like [`sanitize`], but also reports which submitted fields were dropped.
pub fn sanitize_with_report(payload: &SubmittedPayload) -> SanitizeReport {
    let mut report = SanitizeReport::default();

    for field in ColorField::ALL {
        let Some(raw) = payload.get(field.key()) else {
            continue;
        };
        match validate(raw) {
            Ok(color) => report.record.set(field, Some(color)),
            Err(error) => {
                debug!("rejected {} value {:?}: {error}", field.key(), raw);
                report.rejected.push(RejectedField { field, error });
            }
        }
    }

    report
}

// ── Tests ─────────────────────────────────────────────────────────────────────
