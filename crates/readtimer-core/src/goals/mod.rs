//! Reading goals and their recomputation from aggregate statistics.
//!
//! Goal progress is derived, never edited: every statistics change reruns
//! [`GoalEngine::recompute`] over the whole goal list. Completion is
//! therefore non-sticky - a metric regression un-completes a goal, and a
//! manual toggle survives only until the next recompute.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    /// Minutes read, daily or cumulative.
    Time,
    /// Count of finished books.
    Books,
}

/// One user-defined goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    /// Creation timestamp in epoch milliseconds.
    pub id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: GoalKind,
    pub target: u32,
    pub daily: bool,
    pub completed: bool,
    pub progress: u64,
}

impl GoalRecord {
    /// Create a goal after validating its text and target.
    pub fn new(
        text: impl Into<String>,
        kind: GoalKind,
        target: u32,
        daily: bool,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "text".to_string(),
                message: "goal text must not be empty".to_string(),
            });
        }
        if target == 0 {
            return Err(ValidationError::InvalidValue {
                field: "target".to_string(),
                message: "goal target must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            id: Utc::now().timestamp_millis(),
            text,
            kind,
            target,
            daily,
            completed: false,
            progress: 0,
        })
    }
}

/// Aggregate statistics every goal derives from. Computed on demand,
/// never stored as one entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_reading_secs: u64,
    /// Seconds read on the current calendar day.
    pub daily_reading_secs: u64,
    pub finished_books: u64,
}

/// Recomputes goal progress and completion from aggregate statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalEngine;

impl GoalEngine {
    pub fn new() -> Self {
        Self
    }

    /// Recompute every goal's progress and completion.
    ///
    /// Time goals measure whole minutes (floor); book goals all share the
    /// global finished-book count. `completed` is overwritten
    /// unconditionally on every run.
    pub fn recompute(&self, goals: Vec<GoalRecord>, stats: &AggregateStats) -> Vec<GoalRecord> {
        goals
            .into_iter()
            .map(|mut goal| {
                goal.progress = match goal.kind {
                    GoalKind::Time if goal.daily => stats.daily_reading_secs / 60,
                    GoalKind::Time => stats.total_reading_secs / 60,
                    GoalKind::Books => stats.finished_books,
                };
                goal.completed = goal.progress >= u64::from(goal.target);
                goal
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(kind: GoalKind, target: u32, daily: bool) -> GoalRecord {
        GoalRecord {
            id: 1,
            text: "test goal".to_string(),
            kind,
            target,
            daily,
            completed: false,
            progress: 0,
        }
    }

    #[test]
    fn time_goal_uses_total_minutes_floored() {
        let engine = GoalEngine::new();
        let stats = AggregateStats {
            total_reading_secs: 3_659, // 60.98 minutes
            ..Default::default()
        };
        let goals = engine.recompute(vec![goal(GoalKind::Time, 60, false)], &stats);
        assert_eq!(goals[0].progress, 60);
        assert!(goals[0].completed);
    }

    #[test]
    fn daily_time_goal_uses_daily_seconds() {
        let engine = GoalEngine::new();
        let stats = AggregateStats {
            total_reading_secs: 100_000,
            daily_reading_secs: 600,
            ..Default::default()
        };
        let goals = engine.recompute(vec![goal(GoalKind::Time, 15, true)], &stats);
        assert_eq!(goals[0].progress, 10);
        assert!(!goals[0].completed);
    }

    #[test]
    fn books_goal_tracks_finished_count() {
        let engine = GoalEngine::new();
        let stats = AggregateStats {
            finished_books: 3,
            ..Default::default()
        };
        let goals = engine.recompute(vec![goal(GoalKind::Books, 3, false)], &stats);
        assert_eq!(goals[0].progress, 3);
        assert!(goals[0].completed);
    }

    #[test]
    fn completion_is_not_sticky() {
        let engine = GoalEngine::new();
        let up = AggregateStats {
            finished_books: 3,
            ..Default::default()
        };
        let down = AggregateStats {
            finished_books: 2,
            ..Default::default()
        };

        let goals = engine.recompute(vec![goal(GoalKind::Books, 3, false)], &up);
        assert!(goals[0].completed);

        let goals = engine.recompute(goals, &down);
        assert!(!goals[0].completed);
        assert_eq!(goals[0].progress, 2);
    }

    #[test]
    fn manual_completion_is_overwritten() {
        let engine = GoalEngine::new();
        let mut toggled = goal(GoalKind::Time, 100, false);
        toggled.completed = true;

        let goals = engine.recompute(vec![toggled], &AggregateStats::default());
        assert!(!goals[0].completed);
    }

    #[test]
    fn multiple_books_goals_share_progress() {
        let engine = GoalEngine::new();
        let stats = AggregateStats {
            finished_books: 5,
            ..Default::default()
        };
        let goals = engine.recompute(
            vec![goal(GoalKind::Books, 3, false), goal(GoalKind::Books, 10, false)],
            &stats,
        );
        assert_eq!(goals[0].progress, 5);
        assert_eq!(goals[1].progress, 5);
        assert!(goals[0].completed);
        assert!(!goals[1].completed);
    }

    #[test]
    fn new_goal_validates_text_and_target() {
        assert!(GoalRecord::new("  ", GoalKind::Time, 10, false).is_err());
        assert!(GoalRecord::new("Read daily", GoalKind::Time, 0, true).is_err());

        let goal = GoalRecord::new("Read daily", GoalKind::Time, 30, true).unwrap();
        assert!(!goal.completed);
        assert_eq!(goal.progress, 0);
        assert!(goal.id > 0);
    }

    #[test]
    fn goal_serializes_kind_as_type() {
        let json = serde_json::to_value(goal(GoalKind::Books, 3, false)).unwrap();
        assert_eq!(json["type"], "books");
        assert!(json.get("kind").is_none());
    }
}
