//! Cross-week move and lock engine.
//!
//! Weeks unlock sequentially: the first incomplete week by sequence position
//! is the active week, everything after it is locked, complete weeks before
//! it are past. The classification is a pure projection recomputed on every
//! read; no locked flag is ever stored, so lock state can only move forward
//! as tasks complete (or grow by appending new weeks, which land after the
//! frontier and are therefore locked by construction).
//!
//! A move is validated in full before anything changes and applied by
//! building a new plan value, so the caller persists it as a single atomic
//! document replace and no half-moved state can ever be stored.

use crate::error::{CoreError, Result};
use crate::models::{Plan, WeekState};
use crate::params::MoveTask;

/// Classifies every week by sequence position.
pub fn week_states(plan: &Plan) -> Vec<WeekState> {
    let active = plan.weeks.iter().position(|week| !week.is_complete());
    plan.weeks
        .iter()
        .enumerate()
        .map(|(i, _)| match active {
            Some(a) if i < a => WeekState::Past,
            Some(a) if i == a => WeekState::Active,
            Some(_) => WeekState::Locked,
            // Every week complete: nothing is active, nothing is locked.
            None => WeekState::Past,
        })
        .collect()
}

/// Validates and applies a task move, returning a new plan.
///
/// Rejections, checked before any mutation:
/// - the moved task currently holds the timer (pause or complete it first)
/// - the source or destination week is locked (same-week reorders skip the
///   lock checks)
/// - either position is out of range
pub fn move_task(plan: &Plan, request: &MoveTask) -> Result<Plan> {
    let MoveTask {
        source_week,
        source_index,
        dest_week,
        dest_index,
    } = *request;

    let states = week_states(plan);
    if source_week >= plan.weeks.len() || dest_week >= plan.weeks.len() {
        return Err(CoreError::InvalidMove {
            reason: format!(
                "week position out of range: plan has {} weeks",
                plan.weeks.len()
            ),
        });
    }

    let task = plan
        .task(source_week, source_index)
        .ok_or(CoreError::TaskNotFound {
            week_index: source_week,
            task_index: source_index,
        })?;

    if let Some(doing) = plan.doing_position() {
        if doing == (source_week, source_index) {
            return Err(CoreError::InvalidMove {
                reason: format!(
                    "'{}' is currently in progress; pause or complete it before moving",
                    task.title
                ),
            });
        }
    }

    if source_week != dest_week {
        if states[source_week] == WeekState::Locked {
            return Err(CoreError::LockedWeek {
                week_number: plan.weeks[source_week].week_number,
            });
        }
        if states[dest_week] == WeekState::Locked {
            return Err(CoreError::LockedWeek {
                week_number: plan.weeks[dest_week].week_number,
            });
        }
    }

    let mut moved = plan.clone();
    let task = moved.weeks[source_week].tasks.remove(source_index);

    let dest_len = moved.weeks[dest_week].tasks.len();
    if dest_index > dest_len {
        return Err(CoreError::InvalidMove {
            reason: format!(
                "destination position {dest_index} out of range: week {} has {dest_len} tasks",
                moved.weeks[dest_week].week_number
            ),
        });
    }
    moved.weeks[dest_week].tasks.insert(dest_index, task);

    Ok(moved)
}
