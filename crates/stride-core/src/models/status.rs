//! Status enumerations for tasks and weeks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of task execution states.
///
/// This is the single source of truth for a task's lifecycle. The legacy
/// boolean completion flag in stored documents is a projection of this state
/// (see [`crate::models::Task::completed`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionState {
    /// Task has not been started
    #[default]
    Pending,

    /// Task is being worked on and holds the execution timer
    Doing,

    /// Task has been completed
    Done,
}

impl FromStr for ExecutionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ExecutionState::Pending),
            "doing" | "in_progress" => Ok(ExecutionState::Doing),
            "done" => Ok(ExecutionState::Done),
            _ => Err(format!("Invalid execution state: {s}")),
        }
    }
}

impl ExecutionState {
    /// Convert to document string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionState::Pending => "pending",
            ExecutionState::Doing => "doing",
            ExecutionState::Done => "done",
        }
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            ExecutionState::Done => "✓ Done",
            ExecutionState::Doing => "➤ Doing",
            ExecutionState::Pending => "○ Pending",
        }
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, highest priority first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// Convert to document string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived classification of a week's position relative to the unlock
/// frontier. Never stored; recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekState {
    /// Week is complete and sits before the active week
    Past,
    /// First incomplete week by sequence position
    Active,
    /// Week sits after the active week and is not yet reachable
    Locked,
}

impl WeekState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekState::Past => "past",
            WeekState::Active => "active",
            WeekState::Locked => "locked",
        }
    }
}

impl fmt::Display for WeekState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
