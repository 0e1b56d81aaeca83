//! Tri-state save status for the theme editor.
//!
//! ```text
//! idle ──save ok──▶ success ──3s or next edit──▶ idle
//! idle ──save err─▶ error   ──next edit─────────▶ idle
//! ```
//!
//! The timed revert is driven by the caller: [`SaveTracker::record`] hands
//! out a [`SaveTicket`] and the caller passes it back to
//! [`SaveTracker::expire`] once [`SAVE_STATUS_RESET`] has elapsed. A ticket
//! from an older save never resets a newer status.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long `success` stays visible before reverting to `idle`.
pub const SAVE_STATUS_RESET: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Handle for the delayed revert of one recorded save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    generation: u64,
    /// Whether the caller should schedule an expiry for this ticket.
    pub auto_revert: bool,
}

#[derive(Debug, Default)]
pub struct SaveTracker {
    status: SaveStatus,
    generation: u64,
}

impl SaveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    /// Record the outcome of a save attempt.
    pub fn record(&mut self, succeeded: bool) -> SaveTicket {
        self.generation += 1;
        self.status = if succeeded {
            SaveStatus::Success
        } else {
            SaveStatus::Error
        };
        SaveTicket {
            generation: self.generation,
            auto_revert: succeeded,
        }
    }

    /// Revert `success` to `idle` if `ticket` is still the latest save.
    ///
    /// Returns `true` when the status changed.
    pub fn expire(&mut self, ticket: SaveTicket) -> bool {
        if ticket.generation == self.generation && self.status == SaveStatus::Success {
            self.status = SaveStatus::Idle;
            true
        } else {
            false
        }
    }

    /// A new edit clears any shown outcome.
    ///
    /// Returns `true` when the status changed.
    pub fn on_edit(&mut self) -> bool {
        if self.status == SaveStatus::Idle {
            return false;
        }
        self.generation += 1;
        self.status = SaveStatus::Idle;
        true
    }
}
