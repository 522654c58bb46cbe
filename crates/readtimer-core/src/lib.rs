//! # ReadTimer Core Library
//!
//! This library provides the core business logic for the ReadTimer reading
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any GUI would be a thin layer over
//! the same core library.
//!
//! ## Architecture
//!
//! - **Session Timer**: A countdown state machine that requires the caller
//!   to deliver one `tick()` per elapsed second
//! - **Catalog**: Book records and the reconciler that merges completed
//!   sessions into them
//! - **Goals**: Derived progress recomputed from aggregate statistics on
//!   every change
//! - **Store**: Keyed whole-value JSON persistence (SQLite-backed) plus a
//!   TOML configuration file
//! - **Lookup**: Client for the external book-metadata provider, the only
//!   asynchronous boundary
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: Core timer state machine
//! - [`ProgressReconciler`]: Session-to-catalog merge logic
//! - [`GoalEngine`]: Goal progress recomputation
//! - [`ReadingTracker`]: Store-backed orchestrator over all of the above
//! - [`BookLookupClient`]: Book metadata search

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod goals;
pub mod ledger;
pub mod lookup;
pub mod notes;
pub mod store;
pub mod timer;
pub mod tracker;

pub use catalog::{
    finished_count, BookRecord, BookStatus, DuplicatePolicy, ProgressReconciler, SessionOutcome,
    DEFAULT_TOTAL_PAGES, UNKNOWN_AUTHOR,
};
pub use config::Config;
pub use error::{CoreError, LookupError, StoreError, ValidationError};
pub use events::Event;
pub use goals::{AggregateStats, GoalEngine, GoalKind, GoalRecord};
pub use ledger::{DailyLedger, LedgerEntry};
pub use lookup::{BookCandidate, BookLookupClient, SuggestionBox};
pub use notes::{NoteEntry, NoteJournal};
pub use store::{MemoryStore, PersistentStore, SqliteStore};
pub use timer::{SessionTimer, TimerState, DEFAULT_SESSION_SECS};
pub use tracker::ReadingTracker;
