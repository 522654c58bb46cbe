//! Per-calendar-day ledger of minutes read.
//!
//! One ordered map from day to accumulated minutes, serialized as the
//! `readingSessions` array. Entries for past days are never modified and
//! never pruned.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Serialized form of one ledger day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub minutes: u64,
}

/// Ordered day -> minutes map, accumulated across the sessions of each day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LedgerEntry>", into = "Vec<LedgerEntry>")]
pub struct DailyLedger {
    days: BTreeMap<NaiveDate, u64>,
}

impl DailyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate minutes into a day's entry, creating it on the first
    /// session of that day. Returns the day's new total.
    pub fn record(&mut self, date: NaiveDate, minutes: u64) -> u64 {
        let total = self.days.entry(date).or_insert(0);
        *total += minutes;
        *total
    }

    pub fn minutes_on(&self, date: NaiveDate) -> u64 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    /// The day's total converted to seconds, the unit goal progress uses.
    pub fn daily_secs(&self, date: NaiveDate) -> u64 {
        self.minutes_on(date) * 60
    }

    pub fn total_minutes(&self) -> u64 {
        self.days.values().sum()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LedgerEntry> + '_ {
        self.days.iter().map(|(&date, &minutes)| LedgerEntry { date, minutes })
    }
}

impl From<Vec<LedgerEntry>> for DailyLedger {
    fn from(entries: Vec<LedgerEntry>) -> Self {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.record(entry.date, entry.minutes);
        }
        ledger
    }
}

impl From<DailyLedger> for Vec<LedgerEntry> {
    fn from(ledger: DailyLedger) -> Self {
        ledger.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn same_day_sessions_accumulate_in_any_order() {
        let mut a = DailyLedger::new();
        a.record(day("2026-08-06"), 10);
        a.record(day("2026-08-06"), 15);

        let mut b = DailyLedger::new();
        b.record(day("2026-08-06"), 15);
        b.record(day("2026-08-06"), 10);

        assert_eq!(a.minutes_on(day("2026-08-06")), 25);
        assert_eq!(a, b);
    }

    #[test]
    fn days_are_independent() {
        let mut ledger = DailyLedger::new();
        ledger.record(day("2026-08-05"), 30);
        ledger.record(day("2026-08-06"), 5);

        assert_eq!(ledger.minutes_on(day("2026-08-05")), 30);
        assert_eq!(ledger.minutes_on(day("2026-08-06")), 5);
        assert_eq!(ledger.minutes_on(day("2026-08-07")), 0);
        assert_eq!(ledger.total_minutes(), 35);
    }

    #[test]
    fn daily_secs_converts_minutes() {
        let mut ledger = DailyLedger::new();
        ledger.record(day("2026-08-06"), 25);
        assert_eq!(ledger.daily_secs(day("2026-08-06")), 1500);
        assert_eq!(ledger.daily_secs(day("2026-08-07")), 0);
    }

    #[test]
    fn serializes_as_ordered_entry_array() {
        let mut ledger = DailyLedger::new();
        ledger.record(day("2026-08-06"), 5);
        ledger.record(day("2026-08-04"), 10);

        let json = serde_json::to_string(&ledger).unwrap();
        let parsed: DailyLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ledger);

        let entries: Vec<LedgerEntry> = ledger.clone().into();
        assert_eq!(entries[0].date, day("2026-08-04"));
        assert_eq!(entries[1].date, day("2026-08-06"));
    }
}
