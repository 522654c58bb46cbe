//! Catalog/store integration.
//!
//! [`ReadingTracker`] owns the in-memory collections, loads them from a
//! [`PersistentStore`] at construction, and writes each one back as a whole
//! value immediately after every mutation. Goals are recomputed after any
//! change to the statistics they derive from.
//!
//! Single logical writer: the design does not defend against two
//! concurrent trackers issuing conflicting whole-value writes.

use chrono::{NaiveDate, Utc};

use crate::catalog::{finished_count, BookRecord, ProgressReconciler, SessionOutcome};
use crate::error::{CoreError, StoreError};
use crate::events::Event;
use crate::goals::{AggregateStats, GoalEngine, GoalKind, GoalRecord};
use crate::ledger::DailyLedger;
use crate::lookup::BookCandidate;
use crate::notes::{NoteEntry, NoteJournal};
use crate::store::{keys, PersistentStore};

/// Orchestrates sessions, catalog, goals, ledger, and notes over one store.
pub struct ReadingTracker<S: PersistentStore> {
    store: S,
    catalog: Vec<BookRecord>,
    goals: Vec<GoalRecord>,
    ledger: DailyLedger,
    journal: NoteJournal,
    total_reading_secs: u64,
    reconciler: ProgressReconciler,
    engine: GoalEngine,
}

impl<S: PersistentStore> ReadingTracker<S> {
    /// Load the last persisted state, defaulting each collection that is
    /// absent or malformed.
    pub fn new(store: S) -> Self {
        let catalog = store.get_or_default(keys::READING_PROGRESS);
        let goals = store.get_or_default(keys::GOALS);
        let ledger = store.get_or_default(keys::READING_SESSIONS);
        let journal = store.get_or_default(keys::READING_NOTES);
        let total_reading_secs = store.get_or_default(keys::TOTAL_READING_TIME);

        Self {
            store,
            catalog,
            goals,
            ledger,
            journal,
            total_reading_secs,
            reconciler: ProgressReconciler::new(),
            engine: GoalEngine::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &[BookRecord] {
        &self.catalog
    }

    pub fn goals(&self) -> &[GoalRecord] {
        &self.goals
    }

    pub fn ledger(&self) -> &DailyLedger {
        &self.ledger
    }

    pub fn notes(&self) -> &[NoteEntry] {
        self.journal.entries()
    }

    pub fn total_reading_secs(&self) -> u64 {
        self.total_reading_secs
    }

    /// Aggregate statistics for the current calendar day.
    pub fn stats(&self) -> AggregateStats {
        self.stats_on(today())
    }

    pub fn stats_on(&self, day: NaiveDate) -> AggregateStats {
        AggregateStats {
            total_reading_secs: self.total_reading_secs,
            daily_reading_secs: self.ledger.daily_secs(day),
            finished_books: finished_count(&self.catalog),
        }
    }

    // ── Session flow ─────────────────────────────────────────────────

    /// Merge a completed session's elapsed time into the ledger and the
    /// running total, then recompute goals.
    pub fn record_session(&mut self, elapsed_secs: u64) -> Result<Vec<Event>, StoreError> {
        self.record_session_on(today(), elapsed_secs)
    }

    pub fn record_session_on(
        &mut self,
        day: NaiveDate,
        elapsed_secs: u64,
    ) -> Result<Vec<Event>, StoreError> {
        let minutes = elapsed_secs / 60;
        let daily_total_min = self.ledger.record(day, minutes);
        self.total_reading_secs += elapsed_secs;

        self.store.set_json(keys::READING_SESSIONS, &self.ledger)?;
        self.store
            .set_json(keys::TOTAL_READING_TIME, &self.total_reading_secs)?;
        self.store
            .set_json(&keys::daily_reading_time(day), &(daily_total_min * 60))?;

        let mut events = vec![Event::SessionRecorded {
            date: day,
            minutes,
            daily_total_min,
            at: Utc::now(),
        }];
        events.extend(self.recompute_goals_on(day)?);
        Ok(events)
    }

    /// Reconcile a session outcome into the catalog, journal its note,
    /// and recompute goals.
    ///
    /// Returns the resulting record plus events - `BookFinished` when the
    /// record's pages reached its total.
    pub fn save_reading(
        &mut self,
        outcome: SessionOutcome,
    ) -> Result<(BookRecord, Vec<Event>), StoreError> {
        self.save_reading_on(today(), outcome)
    }

    pub fn save_reading_on(
        &mut self,
        day: NaiveDate,
        outcome: SessionOutcome,
    ) -> Result<(BookRecord, Vec<Event>), StoreError> {
        let note = outcome.note.clone();
        let catalog = std::mem::take(&mut self.catalog);
        let (catalog, record) = self.reconciler.reconcile(outcome, catalog);
        self.catalog = catalog;
        self.store.set_json(keys::READING_PROGRESS, &self.catalog)?;

        if !note.trim().is_empty() {
            self.journal.append(record.title.clone(), note, Utc::now());
            self.store.set_json(keys::READING_NOTES, &self.journal)?;
        }

        let mut events = Vec::new();
        if record.is_finished() {
            events.push(Event::BookFinished {
                title: record.title.clone(),
                at: Utc::now(),
            });
        }
        events.extend(self.recompute_goals_on(day)?);
        Ok((record, events))
    }

    // ── Catalog management ───────────────────────────────────────────

    /// Add a lookup candidate as an unread book.
    pub fn add_book(
        &mut self,
        candidate: BookCandidate,
    ) -> Result<(BookRecord, Vec<Event>), StoreError> {
        let catalog = std::mem::take(&mut self.catalog);
        let (catalog, record) = self.reconciler.add_candidate(candidate, catalog);
        self.catalog = catalog;
        self.store.set_json(keys::READING_PROGRESS, &self.catalog)?;
        let events = self.recompute_goals_on(today())?;
        Ok((record, events))
    }

    /// Replace the record with a matching id. A missing id leaves the
    /// catalog unchanged.
    pub fn update_book(&mut self, updated: BookRecord) -> Result<Vec<Event>, StoreError> {
        if let Some(record) = self.catalog.iter_mut().find(|b| b.id == updated.id) {
            *record = updated;
            self.store.set_json(keys::READING_PROGRESS, &self.catalog)?;
            return self.recompute_goals_on(today());
        }
        Ok(Vec::new())
    }

    /// Replace a book's note wholesale (trimmed). Does not touch the
    /// journal.
    pub fn set_book_note(&mut self, id: &str, note: &str) -> Result<(), StoreError> {
        if let Some(record) = self.catalog.iter_mut().find(|b| b.id == id) {
            record.note = note.trim().to_string();
            self.store.set_json(keys::READING_PROGRESS, &self.catalog)?;
        }
        Ok(())
    }

    pub fn delete_book(&mut self, id: &str) -> Result<Vec<Event>, StoreError> {
        let before = self.catalog.len();
        self.catalog.retain(|b| b.id != id);
        if self.catalog.len() == before {
            return Ok(Vec::new());
        }
        self.store.set_json(keys::READING_PROGRESS, &self.catalog)?;
        self.recompute_goals_on(today())
    }

    // ── Goal management ──────────────────────────────────────────────

    /// Create a goal and bring its progress up to date immediately.
    pub fn add_goal(
        &mut self,
        text: impl Into<String>,
        kind: GoalKind,
        target: u32,
        daily: bool,
    ) -> Result<GoalRecord, CoreError> {
        let goal = GoalRecord::new(text, kind, target, daily)?;
        let id = goal.id;
        self.goals.push(goal);
        self.recompute_goals_on(today())?;
        let goal = self
            .goals
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| CoreError::Custom("goal vanished during recompute".to_string()))?;
        Ok(goal)
    }

    /// Flip a goal's completion flag by hand.
    ///
    /// The flip is persisted but survives only until the next recompute
    /// overwrites it. Returns the new flag, or `None` for an unknown id.
    pub fn toggle_goal(&mut self, id: i64) -> Result<Option<bool>, StoreError> {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };
        goal.completed = !goal.completed;
        let completed = goal.completed;
        self.store.set_json(keys::GOALS, &self.goals)?;
        Ok(Some(completed))
    }

    pub fn delete_goal(&mut self, id: i64) -> Result<(), StoreError> {
        self.goals.retain(|g| g.id != id);
        self.store.set_json(keys::GOALS, &self.goals)
    }

    // ── Notes ────────────────────────────────────────────────────────

    pub fn delete_note(&mut self, index: usize) -> Result<Option<NoteEntry>, StoreError> {
        let removed = self.journal.remove(index);
        if removed.is_some() {
            self.store.set_json(keys::READING_NOTES, &self.journal)?;
        }
        Ok(removed)
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Recompute every goal from the statistics of `day`, persist, and
    /// emit `GoalCompleted` for goals that newly reached their target.
    fn recompute_goals_on(&mut self, day: NaiveDate) -> Result<Vec<Event>, StoreError> {
        let stats = self.stats_on(day);
        let previously_completed: Vec<i64> = self
            .goals
            .iter()
            .filter(|g| g.completed)
            .map(|g| g.id)
            .collect();

        let goals = std::mem::take(&mut self.goals);
        self.goals = self.engine.recompute(goals, &stats);
        self.store.set_json(keys::GOALS, &self.goals)?;

        let events = self
            .goals
            .iter()
            .filter(|g| g.completed && !previously_completed.contains(&g.id))
            .map(|g| Event::GoalCompleted {
                goal_id: g.id,
                text: g.text.clone(),
                at: Utc::now(),
            })
            .collect();
        Ok(events)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
