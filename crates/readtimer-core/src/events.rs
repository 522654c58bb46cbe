use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The CLI prints them; a front end would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_secs: u64,
        length_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Emitted exactly once per session.
    SessionCompleted {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// A completed session was merged into the daily ledger.
    SessionRecorded {
        date: NaiveDate,
        minutes: u64,
        daily_total_min: u64,
        at: DateTime<Utc>,
    },
    /// Reconciliation pushed a book's pages past its total.
    BookFinished {
        title: String,
        at: DateTime<Utc>,
    },
    /// A goal's recomputed progress reached its target.
    GoalCompleted {
        goal_id: i64,
        text: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        remaining_secs: u64,
        length_secs: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
}
