//! Working state of one theme editor session.
//!
//! The editor owns the in-memory document. Every accepted change swaps in a
//! new `Arc<ThemeConfig>`; snapshots already handed to previews are never
//! mutated. Nothing here persists: saving is requested explicitly and its
//! outcome reported back through [`ThemeEditor::finish_save`].

use std::sync::Arc;

use serde_json::Value;

use super::document::{FieldIssue, MergedTheme, ThemeConfig};
use super::message::{FieldEdit, SaveStatusPayload};
use super::save_status::{SaveStatus, SaveTicket, SaveTracker};
use crate::error::CoreError;

/// Result of an accepted edit.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// The new document, to broadcast to previews.
    pub config: Arc<ThemeConfig>,
    /// Whether the save status went back to `idle` because of this edit.
    pub status_reset: bool,
}

/// An edit the editor refused. The working document is unchanged.
#[derive(Debug)]
pub struct EditRejected {
    pub error: CoreError,
    /// Fields that failed validation; empty for malformed paths.
    pub issues: Vec<FieldIssue>,
}

impl EditRejected {
    fn check(merged: MergedTheme) -> Result<ThemeConfig, Self> {
        let issues = merged.issues.clone();
        merged.into_strict().map_err(|error| Self { error, issues })
    }
}

impl From<CoreError> for EditRejected {
    fn from(error: CoreError) -> Self {
        Self {
            error,
            issues: Vec::new(),
        }
    }
}

/// The document and base version to persist.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub config: Arc<ThemeConfig>,
    pub base_version: Option<i64>,
}

/// What the store reported for a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub version: i64,
    /// Set when the save replaced a document newer than the one edited.
    pub warning: Option<String>,
}

/// Warning for a save whose base version no longer matches the store.
///
/// Saves are last-writer-wins: a stale base never blocks the write, it only
/// tells the saver that another session's changes were overwritten.
pub fn stale_save_warning(base_version: Option<i64>, stored_version: Option<i64>) -> Option<String> {
    if base_version == stored_version {
        return None;
    }
    let stored = stored_version.map_or_else(|| "none".to_string(), |v| v.to_string());
    let base = base_version.map_or_else(|| "none".to_string(), |v| v.to_string());
    Some(format!(
        "Theme was changed by another session (stored version {stored}, edited version {base}); \
         those changes were overwritten"
    ))
}

#[derive(Debug)]
pub struct ThemeEditor {
    config: Arc<ThemeConfig>,
    version: Option<i64>,
    save: SaveTracker,
}

impl ThemeEditor {
    /// Start from a stored document (possibly partial) and its version.
    ///
    /// Returns the editor and any stored fields that had to be defaulted.
    pub fn load(stored: Option<&Value>, version: Option<i64>) -> (Self, Vec<FieldIssue>) {
        let merged = ThemeConfig::merge(stored.unwrap_or(&Value::Null));
        let editor = Self {
            config: Arc::new(merged.config),
            version,
            save: SaveTracker::new(),
        };
        (editor, merged.issues)
    }

    pub fn config(&self) -> Arc<ThemeConfig> {
        Arc::clone(&self.config)
    }

    pub fn version(&self) -> Option<i64> {
        self.version
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save.status()
    }

    /// Replace the working document with a full or partial one.
    ///
    /// Present-but-invalid fields reject the whole update; the current
    /// document stays as it was.
    pub fn replace(&mut self, payload: &Value) -> Result<EditOutcome, EditRejected> {
        let config = EditRejected::check(ThemeConfig::merge(payload))?;
        Ok(self.accept(config))
    }

    /// Change one field.
    pub fn edit(&mut self, edit: &FieldEdit) -> Result<EditOutcome, EditRejected> {
        let merged = self.config.merge_field(&edit.path, edit.value.clone())?;
        let config = EditRejected::check(merged)?;
        Ok(self.accept(config))
    }

    fn accept(&mut self, config: ThemeConfig) -> EditOutcome {
        self.config = Arc::new(config);
        let status_reset = self.save.on_edit();
        EditOutcome {
            config: Arc::clone(&self.config),
            status_reset,
        }
    }

    /// Snapshot what should be persisted.
    pub fn begin_save(&self) -> SaveRequest {
        SaveRequest {
            config: Arc::clone(&self.config),
            base_version: self.version,
        }
    }

    /// Record the store's answer. The returned ticket must be passed to
    /// [`ThemeEditor::expire_status`] after the reset delay when
    /// `auto_revert` is set.
    pub fn finish_save(
        &mut self,
        result: Result<SaveReceipt, String>,
    ) -> (SaveTicket, SaveStatusPayload) {
        match result {
            Ok(receipt) => {
                self.version = Some(receipt.version);
                let ticket = self.save.record(true);
                (
                    ticket,
                    SaveStatusPayload {
                        status: SaveStatus::Success,
                        version: Some(receipt.version),
                        warning: receipt.warning,
                    },
                )
            }
            Err(_) => {
                let ticket = self.save.record(false);
                (
                    ticket,
                    SaveStatusPayload {
                        status: SaveStatus::Error,
                        version: self.version,
                        warning: None,
                    },
                )
            }
        }
    }

    /// Apply a delayed revert. Returns the payload to send if the status
    /// changed.
    pub fn expire_status(&mut self, ticket: SaveTicket) -> Option<SaveStatusPayload> {
        self.save.expire(ticket).then(|| self.idle_payload())
    }

    /// The `idle` status message.
    pub fn idle_payload(&self) -> SaveStatusPayload {
        SaveStatusPayload {
            status: SaveStatus::Idle,
            version: self.version,
            warning: None,
        }
    }
}
