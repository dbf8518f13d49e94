//! Task state machine.
//!
//! Pure transition functions for a single task's lifecycle:
//!
//! ```text
//!   pending ──start──▶ doing ──complete──▶ done
//!      │ ▲               │                   │
//!      │ └────pause──────┘                   │
//!      ├────────────complete────────────────▶│
//!      ◀───────────────reopen────────────────┘
//! ```
//!
//! The functions mutate only the task record handed to them and take "now"
//! as an argument. The caller owns everything around the transition:
//! enforcing the single-active-timer invariant across the plan, persisting
//! the document afterward, and crediting the streak log.

use jiff::Timestamp;

use crate::error::{CoreError, Result};
use crate::models::{ExecutionState, Task};

/// Starts work on a pending task and stamps the timer start.
///
/// The plan-wide "no other task is doing" check belongs to the timer
/// controller; this function only guards the task-local transition.
pub fn start(task: &mut Task, now: Timestamp) -> Result<()> {
    if task.execution_state != ExecutionState::Pending {
        return Err(CoreError::InvalidTransition {
            from: task.execution_state,
            to: ExecutionState::Doing,
        });
    }
    task.execution_state = ExecutionState::Doing;
    task.execution_started_at = Some(now);
    Ok(())
}

/// Pauses a doing task, banking the elapsed run into `time_spent_seconds`.
pub fn pause(task: &mut Task, now: Timestamp) -> Result<()> {
    if task.execution_state != ExecutionState::Doing {
        return Err(CoreError::InvalidTransition {
            from: task.execution_state,
            to: ExecutionState::Pending,
        });
    }
    bank_elapsed(task, now);
    task.execution_state = ExecutionState::Pending;
    Ok(())
}

/// Completes a task from `pending` (manual check without timing) or from
/// `doing` (finalizing the elapsed run first).
pub fn complete(task: &mut Task, now: Timestamp) -> Result<()> {
    match task.execution_state {
        ExecutionState::Pending => {}
        ExecutionState::Doing => bank_elapsed(task, now),
        ExecutionState::Done => {
            return Err(CoreError::InvalidTransition {
                from: ExecutionState::Done,
                to: ExecutionState::Done,
            });
        }
    }
    task.execution_state = ExecutionState::Done;
    task.completed_at = Some(now);
    Ok(())
}

/// Reopens a done task (undo/uncheck), clearing the completion timestamp.
///
/// Accumulated time is kept; whether the streak credit for the day survives
/// is a policy question answered by the caller.
pub fn reopen(task: &mut Task) -> Result<()> {
    if task.execution_state != ExecutionState::Done {
        return Err(CoreError::InvalidTransition {
            from: task.execution_state,
            to: ExecutionState::Pending,
        });
    }
    task.execution_state = ExecutionState::Pending;
    task.completed_at = None;
    Ok(())
}

/// Folds the current run into the accumulated total and clears the start
/// timestamp. Negative spans (clock skew) count as zero so the total stays
/// monotonic.
fn bank_elapsed(task: &mut Task, now: Timestamp) {
    if let Some(started_at) = task.execution_started_at.take() {
        let secs = now.duration_since(started_at).as_secs();
        task.time_spent_seconds += secs.max(0) as u64;
    }
}
