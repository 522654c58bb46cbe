//! Journal of per-session reading notes.
//!
//! Session notes land in two places: appended to the book record's note
//! field during reconciliation, and journaled here with a timestamp so
//! they can be browsed and deleted independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub date: DateTime<Utc>,
    pub book: String,
    pub text: String,
}

/// Append-only journal, serialized as the `readingNotes` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteJournal {
    entries: Vec<NoteEntry>,
}

impl NoteJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, book: impl Into<String>, text: impl Into<String>, at: DateTime<Utc>) {
        self.entries.push(NoteEntry {
            date: at,
            book: book.into(),
            text: text.into(),
        });
    }

    /// Remove by position. Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<NoteEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn entries(&self) -> &[NoteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
