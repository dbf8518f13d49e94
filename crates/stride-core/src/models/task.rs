//! Task model definition and the legacy-document bridge.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ExecutionState, Priority};

/// Represents an individual task within a week.
///
/// `execution_state` is the only stored lifecycle field. Earlier document
/// versions also carried a redundant `completed` boolean that call sites kept
/// in sync by hand; here it is derived on serialization and reconciled on
/// load (see [`TaskDoc`]), so no call site can desynchronize the two.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "TaskDoc", into = "TaskDoc")]
pub struct Task {
    /// Brief title/summary of the task
    pub title: String,

    /// Priority of the task
    pub priority: Priority,

    /// Estimated effort in hours (positive)
    pub estimated_hours: f64,

    /// Current lifecycle state (source of truth)
    pub execution_state: ExecutionState,

    /// Timestamp of completion; present iff `execution_state` is `Done`
    pub completed_at: Option<Timestamp>,

    /// Optional scheduled slot assigned by calendar sync or the user
    pub scheduled_at: Option<Timestamp>,

    /// Timestamp the timer was started; present iff `execution_state` is
    /// `Doing`
    pub execution_started_at: Option<Timestamp>,

    /// Accumulated execution time in seconds, monotonic non-decreasing
    pub time_spent_seconds: u64,
}

impl Task {
    /// Creates a new pending task.
    pub fn new(title: impl Into<String>, priority: Priority, estimated_hours: f64) -> Self {
        Self {
            title: title.into(),
            priority,
            estimated_hours,
            execution_state: ExecutionState::Pending,
            completed_at: None,
            scheduled_at: None,
            execution_started_at: None,
            time_spent_seconds: 0,
        }
    }

    /// Legacy completion flag, derived from the execution state.
    pub fn completed(&self) -> bool {
        self.execution_state == ExecutionState::Done
    }

    /// Whether the task still counts toward remaining work.
    pub fn is_incomplete(&self) -> bool {
        self.execution_state != ExecutionState::Done
    }
}

/// Wire representation of a task in the persisted JSON document.
///
/// Carries the legacy `completed` boolean so documents written by this code
/// stay readable by older clients, and documents written by older clients
/// (which may lack `executionState`) still load with the right state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDoc {
    pub title: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_estimate")]
    pub estimated_hours: f64,
    #[serde(default)]
    pub execution_state: Option<ExecutionState>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_started_at: Option<Timestamp>,
    #[serde(default)]
    pub time_spent_seconds: u64,
}

fn default_estimate() -> f64 {
    1.0
}

impl From<TaskDoc> for Task {
    fn from(doc: TaskDoc) -> Self {
        // Reconcile the two completion encodings. The execution state wins
        // when present; a legacy document with only `completed: true`
        // promotes to Done.
        let execution_state = match doc.execution_state {
            Some(state) => state,
            None if doc.completed => ExecutionState::Done,
            None => ExecutionState::Pending,
        };

        Self {
            title: doc.title,
            priority: doc.priority,
            estimated_hours: doc.estimated_hours,
            execution_state,
            completed_at: doc.completed_at,
            scheduled_at: doc.scheduled_at,
            execution_started_at: doc.execution_started_at,
            time_spent_seconds: doc.time_spent_seconds,
        }
    }
}

impl From<Task> for TaskDoc {
    fn from(task: Task) -> Self {
        Self {
            title: task.title,
            priority: task.priority,
            estimated_hours: task.estimated_hours,
            completed: task.execution_state == ExecutionState::Done,
            execution_state: Some(task.execution_state),
            completed_at: task.completed_at,
            scheduled_at: task.scheduled_at,
            execution_started_at: task.execution_started_at,
            time_spent_seconds: task.time_spent_seconds,
        }
    }
}
