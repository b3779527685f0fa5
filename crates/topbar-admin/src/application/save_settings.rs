//! Save pipeline for settings submissions.
//!
//! ```text
//! payload ──sanitize──▶ partial record ──merge?──▶ full replacement ──put──▶ store
//! ```
//!
//! Under [`MergePolicy::Merge`] the sanitized fields are overlaid onto the
//! previously persisted record, so submitting (or mangling) only one color
//! leaves the other untouched.  [`MergePolicy::Replace`] persists exactly
//! the fields that validated.  In both cases the store receives one complete
//! record; fields are never patched in place.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use topbar_core::{SettingsRecord, StoredSettings};
use tracing::{info, warn};

use super::ports::{SettingsStore, StoreError};
use super::sanitize_settings::{sanitize_with_report, RejectedField, SubmittedPayload};

/// How a sanitized submission is combined with what is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Keep previously stored values for fields the submission did not
    /// validly provide.
    #[default]
    Merge,
    /// Store only the fields that validated; the rest revert to defaults.
    Replace,
}

/// Error type for saving a submission.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The previous record could not be fetched for merging.  Nothing was written.
    #[error("could not load current settings to merge with: {0}")]
    LoadPrevious(#[source] StoreError),

    /// The new record could not be written.
    #[error("could not persist settings: {0}")]
    Persist(#[source] StoreError),
}

/// What a successful save did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The record written to the store.
    pub stored: StoredSettings,
    /// The settings now in effect, defaults applied.
    pub record: SettingsRecord,
    /// Submitted fields that failed validation and were not saved.
    pub rejected: Vec<RejectedField>,
}

/// Sanitizes `payload` and persists the result under `name`.
///
/// Concurrent saves are last-write-wins.
///
/// # Errors
///
/// Returns [`SaveError::LoadPrevious`] if merging needs the previous record
/// and the store cannot provide it, and [`SaveError::Persist`] if the write
/// itself fails.  Invalid field values are *not* errors; see
/// [`SaveOutcome::rejected`].
pub fn save_settings(
    store: &dyn SettingsStore,
    name: &str,
    payload: &SubmittedPayload,
    policy: MergePolicy,
) -> Result<SaveOutcome, SaveError> {
    let report = sanitize_with_report(payload);

    let stored = match policy {
        MergePolicy::Replace => report.record,
        MergePolicy::Merge => {
            let previous = store
                .get(name)
                .map_err(SaveError::LoadPrevious)?
                .unwrap_or_default();
            report.record.merged_onto(&previous)
        }
    };

    store.put(name, &stored).map_err(SaveError::Persist)?;

    if !report.rejected.is_empty() {
        warn!(
            "saved {name:?} without {} rejected field(s)",
            report.rejected.len()
        );
    }
    info!("saved settings {name:?} ({policy:?})");

    Ok(SaveOutcome {
        record: SettingsRecord::resolve(Some(&stored)),
        stored,
        rejected: report.rejected,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
