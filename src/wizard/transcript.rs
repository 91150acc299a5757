//! Append-only chat transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bot => write!(f, "bot"),
            Self::User => write!(f, "user"),
        }
    }
}

/// One message in the chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub text: String,
    /// Total-order key within the log; assigned on append, never reused
    /// within a log lifetime.
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
}

/// Append-only ordered log of exchanged messages.
///
/// Entries are totally ordered by `sequence`; there is no reordering,
/// deletion, or mutation of existing entries. `clear()` starts a fresh log
/// (numbering restarts at zero) and is reserved for session reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptLog {
    entries: Vec<TranscriptEntry>,
    next_sequence: u64,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, assigning the next sequence number.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(TranscriptEntry {
            sender,
            text: text.into(),
            sequence,
            timestamp: Utc::now(),
        });
        sequence
    }

    /// Read-only ordered view for the rendering collaborator.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries and restart numbering. Session reset only.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_sequence = 0;
    }
}
