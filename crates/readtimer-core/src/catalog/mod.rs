//! Book catalog and progress reconciliation.
//!
//! A completed session produces a [`SessionOutcome`]; the
//! [`ProgressReconciler`] merges it into the catalog. Reconciliation is a
//! pure function over the catalog - the caller persists the result.

mod index;

pub use index::{DuplicatePolicy, TitleIndex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lookup::BookCandidate;

/// Total-pages fallback when neither the user nor the lookup provider
/// supplied a page count.
pub const DEFAULT_TOTAL_PAGES: u32 = 300;

/// Author fallback for records created without one.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookStatus {
    Reading,
    Finished,
    ToRead,
}

/// One tracked book. `pages_read` may exceed `total_pages`; nothing
/// clamps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Opaque identifier; never used for merge identity.
    pub id: String,
    pub title: String,
    pub author: String,
    pub pages_read: u32,
    pub total_pages: u32,
    pub note: String,
    pub status: BookStatus,
}

impl BookRecord {
    /// Whether the record counts toward the finished-books statistic.
    ///
    /// A zero page total never counts, mirroring the goal aggregation
    /// rather than the reconciler's status override.
    pub fn is_finished(&self) -> bool {
        self.total_pages > 0 && self.pages_read >= self.total_pages
    }
}

/// What a completed session reports back, before it is merged into the
/// catalog. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Target title; resolves to an existing record or names a new one.
    pub title: String,
    /// Author for a newly created record. `None` falls back to
    /// [`UNKNOWN_AUTHOR`].
    pub author: Option<String>,
    /// Page total for a newly created record. `None` falls back to
    /// [`DEFAULT_TOTAL_PAGES`].
    pub total_pages: Option<u32>,
    pub pages_delta: u32,
    pub note: String,
    pub status: BookStatus,
}

/// Count of catalog records whose pages read reached their total.
pub fn finished_count(catalog: &[BookRecord]) -> u64 {
    catalog.iter().filter(|b| b.is_finished()).count() as u64
}

/// Merges session outcomes into the book catalog.
#[derive(Debug, Clone, Default)]
pub struct ProgressReconciler {
    policy: DuplicatePolicy,
}

impl ProgressReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Merge a session outcome into the catalog.
    ///
    /// Returns the catalog with the affected record replaced (or appended)
    /// and a copy of the resulting record, so the caller can report a
    /// finished book.
    ///
    /// When the target title exists, pages are added, the requested status
    /// is applied, and the note is appended behind a newline separator -
    /// the separator is inserted even for an empty append, leaving a
    /// trailing blank line. When it does not exist a new record is created
    /// with the documented author and page-total fallbacks. Either way, a
    /// record whose pages read reach its total is forced to `Finished`
    /// regardless of the requested status.
    pub fn reconcile(
        &self,
        outcome: SessionOutcome,
        mut catalog: Vec<BookRecord>,
    ) -> (Vec<BookRecord>, BookRecord) {
        let index = TitleIndex::build(&catalog, self.policy);

        let pos = match index.resolve(&outcome.title) {
            Some(pos) => {
                let record = &mut catalog[pos];
                record.pages_read = record.pages_read.saturating_add(outcome.pages_delta);
                record.note = if record.note.is_empty() {
                    outcome.note
                } else {
                    format!("{}\n{}", record.note, outcome.note)
                };
                record.status = outcome.status;
                pos
            }
            None => {
                catalog.push(BookRecord {
                    id: Uuid::new_v4().to_string(),
                    title: outcome.title,
                    author: outcome.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                    pages_read: outcome.pages_delta,
                    total_pages: outcome.total_pages.unwrap_or(DEFAULT_TOTAL_PAGES),
                    note: outcome.note,
                    status: outcome.status,
                });
                catalog.len() - 1
            }
        };

        let record = &mut catalog[pos];
        if record.pages_read >= record.total_pages {
            record.status = BookStatus::Finished;
        }
        let record = record.clone();

        (catalog, record)
    }

    /// Add a lookup candidate directly to the catalog, unread.
    ///
    /// Degenerate reconciliation: zero pages, `ToRead`, no note.
    pub fn add_candidate(
        &self,
        candidate: BookCandidate,
        catalog: Vec<BookRecord>,
    ) -> (Vec<BookRecord>, BookRecord) {
        self.reconcile(
            SessionOutcome {
                title: candidate.title,
                author: Some(candidate.author),
                total_pages: Some(candidate.page_count),
                pages_delta: 0,
                note: String::new(),
                status: BookStatus::ToRead,
            },
            catalog,
        )
    }
}
