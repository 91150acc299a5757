//! Per-session wizard state.

use tokio::task::JoinHandle;
use uuid::Uuid;

use super::profile::ProfileRecord;
use super::transcript::TranscriptLog;

/// Transient scratch state for the step currently awaiting confirmation.
///
/// An ordered toggle set: insertion order is selection order, and toggling a
/// selected option removes it (toggle is its own inverse). Cleared on commit
/// and on session reset.
#[derive(Debug, Clone, Default)]
pub struct SelectionBuffer {
    items: Vec<String>,
}

impl SelectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `option`; returns true if it is selected afterwards.
    pub fn toggle(&mut self, option: &str) -> bool {
        if let Some(pos) = self.items.iter().position(|o| o == option) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(option.to_string());
            true
        }
    }

    pub fn contains(&self, option: &str) -> bool {
        self.items.iter().any(|o| o == option)
    }

    /// Selections in the order they were toggled in.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// The aggregate root of one onboarding run.
///
/// Mutated exclusively by the `WizardController`; created fresh when
/// onboarding starts and re-created (via `clear`) on edit-profile re-entry
/// or logout.
#[derive(Debug)]
pub struct WizardSession {
    pub id: Uuid,
    /// Index of the current step; equals the catalog length once completed.
    pub current_index: usize,
    pub selection: SelectionBuffer,
    pub transcript: TranscriptLog,
    pub profile: ProfileRecord,
    pub completed: bool,
    /// Set once `start()` has been called; cleared by reset.
    pub started: bool,
    /// True while a bot message is scheduled but not yet appended.
    pub is_typing: bool,
    /// The single outstanding delayed-append task, if any.
    pub pending_timer: Option<JoinHandle<()>>,
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            current_index: 0,
            selection: SelectionBuffer::new(),
            transcript: TranscriptLog::new(),
            profile: ProfileRecord::new(),
            completed: false,
            started: false,
            is_typing: false,
            pending_timer: None,
        }
    }

    /// Abort the pending delayed append, if any, so a stale bot message can
    /// never land after the caller has moved on.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_timer.take() {
            handle.abort();
        }
        self.is_typing = false;
    }

    /// Return the session to its initial state. The session id is kept.
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.transcript.clear();
        self.profile.clear();
        self.selection.clear();
        self.current_index = 0;
        self.completed = false;
        self.started = false;
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}
