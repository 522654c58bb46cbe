//! Store keys and payload shapes.
//!
//! Key names match the original localStorage contract so an exported
//! profile stays readable.

use chrono::NaiveDate;

/// Array of `BookRecord`.
pub const READING_PROGRESS: &str = "readingProgress";

/// Array of `GoalRecord`.
pub const GOALS: &str = "goals";

/// The serialized `DailyLedger`: array of `{date, minutes}`.
pub const READING_SESSIONS: &str = "readingSessions";

/// Total seconds read, all time.
pub const TOTAL_READING_TIME: &str = "totalReadingTime";

/// Array of `NoteEntry`.
pub const READING_NOTES: &str = "readingNotes";

/// Seconds read on one calendar day. Write-through only: refreshed on
/// every ledger sync, never read back as a source of truth.
pub fn daily_reading_time(date: NaiveDate) -> String {
    format!("dailyReadingTime_{}", date.format("%Y-%m-%d"))
}
