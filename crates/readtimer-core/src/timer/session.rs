//! Session timer implementation.
//!
//! The timer is a countdown state machine. It does not use internal threads
//! or wall-clock reads - the caller delivers one `tick()` per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> Expired -> (reset) -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = SessionTimer::new();
//! timer.start();
//! // Once per second:
//! timer.tick(); // Returns Some(Event::SessionCompleted) when the countdown hits zero
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Default session length: 25 minutes.
pub const DEFAULT_SESSION_SECS: u64 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Countdown reached zero; the completion event has been emitted.
    /// Only `reset()` leaves this state.
    Expired,
}

/// Countdown state machine for one reading session.
///
/// Ticks are delivered by the caller, one per elapsed second, so the
/// timer itself never blocks and never drifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    state: TimerState,
    /// Configured session length in seconds.
    length_secs: u64,
    /// Remaining time in seconds for the current session.
    remaining_secs: u64,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTimer {
    /// Create a timer in `Idle` with the default session length.
    pub fn new() -> Self {
        Self::with_length(DEFAULT_SESSION_SECS)
    }

    /// Create a timer in `Idle` with the given session length.
    pub fn with_length(length_secs: u64) -> Self {
        Self {
            state: TimerState::Idle,
            length_secs,
            remaining_secs: length_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn length_secs(&self) -> u64 {
        self.length_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Seconds consumed from the current session.
    pub fn elapsed_secs(&self) -> u64 {
        self.length_secs.saturating_sub(self.remaining_secs)
    }

    /// 0.0 .. 1.0 progress through the session.
    pub fn progress(&self) -> f64 {
        if self.length_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.length_secs as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            length_secs: self.length_secs,
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the configured session length.
    ///
    /// Permitted in `Idle` and `Paused` only; rejected (no-op, returns
    /// `false`) while `Running` or `Expired`. In `Idle` the remaining time
    /// is re-armed to the new length; in `Paused` the suspended session's
    /// remaining time is left untouched and the new length takes effect at
    /// the next `reset()`.
    pub fn configure(&mut self, length_secs: u64) -> bool {
        match self.state {
            TimerState::Idle => {
                self.length_secs = length_secs;
                self.remaining_secs = length_secs;
                true
            }
            TimerState::Paused => {
                self.length_secs = length_secs;
                true
            }
            TimerState::Running | TimerState::Expired => false,
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::TimerStarted {
                    remaining_secs: self.remaining_secs,
                    length_secs: self.length_secs,
                    at: Utc::now(),
                })
            }
            // Already running, or expired until reset.
            TimerState::Running | TimerState::Expired => None,
        }
    }

    /// `Running -> Paused`, preserving remaining time exactly.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Any state `-> Idle`, remaining time re-armed to the configured length.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.remaining_secs = self.length_secs;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Deliver one elapsed second.
    ///
    /// Decrements remaining time by exactly one second while `Running`.
    /// When remaining reaches zero the timer transitions to `Expired` and
    /// exactly one `SessionCompleted` is returned, with `elapsed_secs`
    /// equal to the configured length. A tick in any other state, or with
    /// remaining already at zero, is a no-op.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.state = TimerState::Expired;
            return Some(Event::SessionCompleted {
                elapsed_secs: self.length_secs,
                at: Utc::now(),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Tick a running timer `n` times, collecting completion events.
    fn tick_n(timer: &mut SessionTimer, n: u64) -> Vec<Event> {
        (0..n).filter_map(|_| timer.tick()).collect()
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = SessionTimer::new();
        assert_eq!(timer.state(), TimerState::Idle);

        assert!(timer.start().is_some());
        assert_eq!(timer.state(), TimerState::Running);

        assert!(timer.pause().is_some());
        assert_eq!(timer.state(), TimerState::Paused);

        assert!(timer.start().is_some());
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut timer = SessionTimer::new();
        timer.start();
        assert!(timer.start().is_none());
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn pause_preserves_remaining_exactly() {
        let mut timer = SessionTimer::with_length(100);
        timer.start();
        tick_n(&mut timer, 37);
        timer.pause();
        assert_eq!(timer.remaining_secs(), 63);

        // Resume and confirm the countdown picks up where it left off.
        timer.start();
        assert_eq!(timer.remaining_secs(), 63);
        tick_n(&mut timer, 1);
        assert_eq!(timer.remaining_secs(), 62);
    }

    #[test]
    fn completion_emits_exactly_one_event() {
        let mut timer = SessionTimer::with_length(10);
        timer.start();
        let events = tick_n(&mut timer, 10);
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::SessionCompleted { elapsed_secs, .. } => assert_eq!(*elapsed_secs, 10),
            other => panic!("expected SessionCompleted, got {other:?}"),
        }
        assert_eq!(timer.state(), TimerState::Expired);
    }

    #[test]
    fn ticks_after_expiry_are_noops() {
        let mut timer = SessionTimer::with_length(3);
        timer.start();
        tick_n(&mut timer, 3);
        assert_eq!(timer.state(), TimerState::Expired);

        assert!(timer.tick().is_none());
        assert!(timer.start().is_none());
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn reset_rearms_from_any_state() {
        let mut timer = SessionTimer::with_length(5);
        timer.start();
        tick_n(&mut timer, 5);
        assert_eq!(timer.state(), TimerState::Expired);

        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 5);

        // A fresh session completes again after reset.
        timer.start();
        let events = tick_n(&mut timer, 5);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn configure_rejected_while_running() {
        let mut timer = SessionTimer::with_length(60);
        timer.start();
        assert!(!timer.configure(120));
        assert_eq!(timer.length_secs(), 60);
    }

    #[test]
    fn configure_in_idle_rearms_remaining() {
        let mut timer = SessionTimer::new();
        assert!(timer.configure(90));
        assert_eq!(timer.length_secs(), 90);
        assert_eq!(timer.remaining_secs(), 90);
    }

    #[test]
    fn configure_in_paused_preserves_remaining() {
        let mut timer = SessionTimer::with_length(50);
        timer.start();
        tick_n(&mut timer, 10);
        timer.pause();

        assert!(timer.configure(200));
        assert_eq!(timer.remaining_secs(), 40);
        assert_eq!(timer.length_secs(), 200);

        timer.reset();
        assert_eq!(timer.remaining_secs(), 200);
    }

    #[test]
    fn zero_length_timer_never_completes() {
        let mut timer = SessionTimer::with_length(0);
        timer.start();
        assert_eq!(timer.state(), TimerState::Running);
        assert!(tick_n(&mut timer, 10).is_empty());
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn snapshot_reports_progress() {
        let mut timer = SessionTimer::with_length(100);
        timer.start();
        tick_n(&mut timer, 25);
        match timer.snapshot() {
            Event::StateSnapshot {
                state,
                remaining_secs,
                progress,
                ..
            } => {
                assert_eq!(state, TimerState::Running);
                assert_eq!(remaining_secs, 75);
                assert!((progress - 0.25).abs() < 1e-9);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }

    proptest! {
        /// For every length L > 0, running to completion from Idle emits
        /// exactly one SessionCompleted with elapsed == L.
        #[test]
        fn run_to_completion_emits_one_event(length in 1u64..2_000) {
            let mut timer = SessionTimer::with_length(length);
            timer.start();
            let events = tick_n(&mut timer, length + 10);
            prop_assert_eq!(events.len(), 1);
            match &events[0] {
                Event::SessionCompleted { elapsed_secs, .. } => {
                    prop_assert_eq!(*elapsed_secs, length);
                }
                other => {
                    prop_assert!(false, "unexpected event {:?}", other);
                }
            }
        }

        /// Pausing at an arbitrary point never loses or gains time.
        #[test]
        fn pause_resume_has_no_drift(length in 2u64..2_000, at in 1u64..2_000) {
            let at = at.min(length - 1);
            let mut timer = SessionTimer::with_length(length);
            timer.start();
            tick_n(&mut timer, at);
            timer.pause();
            prop_assert_eq!(timer.remaining_secs(), length - at);
            timer.start();
            prop_assert_eq!(timer.remaining_secs(), length - at);
        }
    }
}
