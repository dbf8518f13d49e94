//! Plan and week model definitions, invariant checks, and load-time repair.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ExecutionState, Task};
use crate::error::{CoreError, Result};

/// Represents a complete multi-week plan document.
///
/// This is the single shared mutable resource of the core. All in-place
/// mutation after creation flows through the task state machine and the move
/// engine; every other consumer is a read-only projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Short description of the goal the plan executes
    pub overview: String,

    /// Planned horizon in weeks
    pub total_weeks: u32,

    /// Weeks ordered by ascending week number with no gaps
    pub weeks: Vec<Week>,

    /// Motivational statements shown by the UI
    #[serde(default)]
    pub motivation: Vec<String>,

    /// Whether the plan keeps extending instead of ending
    #[serde(default)]
    pub is_open_ended: bool,

    /// Optional identity statement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_statement: Option<String>,

    /// Strategic objective, opaque pass-through (not processed by the core)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<Value>,

    /// Strategic risks, opaque pass-through (not processed by the core)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risks: Option<Value>,
}

/// A single week within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    /// 1-based week number
    pub week_number: u32,

    /// Focus/theme of the week
    #[serde(default)]
    pub focus: String,

    /// Ordered tasks for the week
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Week {
    /// Creates a new week with the given number and focus.
    pub fn new(week_number: u32, focus: impl Into<String>) -> Self {
        Self {
            week_number,
            focus: focus.into(),
            tasks: Vec::new(),
        }
    }

    /// A week is complete when every task's execution state is `Done`.
    /// An empty week is vacuously complete.
    pub fn is_complete(&self) -> bool {
        self.tasks.iter().all(Task::completed)
    }
}

impl Plan {
    /// Creates an empty plan shell.
    pub fn new(overview: impl Into<String>, total_weeks: u32) -> Self {
        Self {
            overview: overview.into(),
            total_weeks,
            weeks: Vec::new(),
            motivation: Vec::new(),
            is_open_ended: false,
            identity_statement: None,
            objective: None,
            risks: None,
        }
    }

    /// Iterates over every task with its `(week_index, task_index)` position.
    pub fn tasks(&self) -> impl Iterator<Item = (usize, usize, &Task)> {
        self.weeks.iter().enumerate().flat_map(|(wi, week)| {
            week.tasks
                .iter()
                .enumerate()
                .map(move |(ti, task)| (wi, ti, task))
        })
    }

    /// Returns the task at the given position, if any.
    pub fn task(&self, week_index: usize, task_index: usize) -> Option<&Task> {
        self.weeks.get(week_index)?.tasks.get(task_index)
    }

    /// Mutable access to the task at the given position.
    pub fn task_mut(&mut self, week_index: usize, task_index: usize) -> Option<&mut Task> {
        self.weeks.get_mut(week_index)?.tasks.get_mut(task_index)
    }

    /// Position of the task currently holding the timer, if any.
    pub fn doing_position(&self) -> Option<(usize, usize)> {
        self.tasks()
            .find(|(_, _, task)| task.execution_state == ExecutionState::Doing)
            .map(|(wi, ti, _)| (wi, ti))
    }

    /// Total number of tasks across all weeks.
    pub fn total_tasks(&self) -> usize {
        self.weeks.iter().map(|w| w.tasks.len()).sum()
    }

    /// A plan is complete when every week is complete and it has at least
    /// one task.
    pub fn is_complete(&self) -> bool {
        self.total_tasks() > 0 && self.weeks.iter().all(Week::is_complete)
    }

    /// Checks the structural invariants of the document.
    ///
    /// Used to vet documents arriving from the plan generation and extension
    /// services before they are adopted.
    pub fn validate(&self) -> Result<()> {
        for (i, week) in self.weeks.iter().enumerate() {
            let expected = i as u32 + 1;
            if week.week_number != expected {
                return Err(CoreError::InvalidDocument {
                    reason: format!(
                        "week numbers must be sequential: position {i} has week {} (expected {expected})",
                        week.week_number
                    ),
                });
            }
            for task in &week.tasks {
                if task.title.trim().is_empty() {
                    return Err(CoreError::InvalidDocument {
                        reason: format!("week {} has a task with an empty title", week.week_number),
                    });
                }
                if !(task.estimated_hours > 0.0) {
                    return Err(CoreError::InvalidDocument {
                        reason: format!(
                            "task '{}' has non-positive estimated hours",
                            task.title
                        ),
                    });
                }
            }
        }

        let doing = self
            .tasks()
            .filter(|(_, _, t)| t.execution_state == ExecutionState::Doing)
            .count();
        if doing > 1 {
            return Err(CoreError::InvalidDocument {
                reason: format!("{doing} tasks are marked as doing; at most one is allowed"),
            });
        }

        for (wi, ti, task) in self.tasks() {
            let ok = match task.execution_state {
                ExecutionState::Done => task.completed_at.is_some() && task.execution_started_at.is_none(),
                ExecutionState::Doing => task.execution_started_at.is_some() && task.completed_at.is_none(),
                ExecutionState::Pending => task.execution_started_at.is_none() && task.completed_at.is_none(),
            };
            if !ok {
                return Err(CoreError::InvalidDocument {
                    reason: format!(
                        "task '{}' at week {wi}, position {ti} has timestamps inconsistent with state '{}'",
                        task.title, task.execution_state
                    ),
                });
            }
        }

        Ok(())
    }

    /// Best-effort repair of invariant violations found in a stored document.
    ///
    /// The core does not crash on a bad document (two tasks `doing`, stray or
    /// missing companion timestamps); it repairs what it can and reports each
    /// repair so the caller can log it. The first `doing` task wins; any
    /// later ones demote to pending.
    pub fn normalize(&mut self, now: Timestamp) -> Vec<String> {
        let mut notes = Vec::new();
        let mut seen_doing = false;

        for week in &mut self.weeks {
            for task in &mut week.tasks {
                match task.execution_state {
                    ExecutionState::Doing => {
                        if seen_doing {
                            notes.push(format!(
                                "demoted '{}' to pending: another task already holds the timer",
                                task.title
                            ));
                            task.execution_state = ExecutionState::Pending;
                            task.execution_started_at = None;
                        } else {
                            seen_doing = true;
                            if task.execution_started_at.is_none() {
                                notes.push(format!(
                                    "task '{}' is doing without a start timestamp; timer restarts now",
                                    task.title
                                ));
                                task.execution_started_at = Some(now);
                            }
                            if task.completed_at.take().is_some() {
                                notes.push(format!(
                                    "cleared completion timestamp on doing task '{}'",
                                    task.title
                                ));
                            }
                        }
                    }
                    ExecutionState::Pending => {
                        if task.execution_started_at.take().is_some() {
                            notes.push(format!(
                                "cleared stray start timestamp on pending task '{}'",
                                task.title
                            ));
                        }
                        if task.completed_at.take().is_some() {
                            notes.push(format!(
                                "cleared stray completion timestamp on pending task '{}'",
                                task.title
                            ));
                        }
                    }
                    ExecutionState::Done => {
                        if task.execution_started_at.take().is_some() {
                            notes.push(format!(
                                "cleared stray start timestamp on done task '{}'",
                                task.title
                            ));
                        }
                        if task.completed_at.is_none() {
                            notes.push(format!(
                                "task '{}' is done without a completion timestamp; stamping load time",
                                task.title
                            ));
                            task.completed_at = Some(now);
                        }
                    }
                }
            }
        }

        notes
    }
}
