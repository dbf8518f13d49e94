//! Validation for plan documents arriving from outside, and calendar export.
//!
//! The plan generation and extension services are opaque request/response
//! collaborators; the core only consumes the documents they produce and vets
//! them against the model invariants before use. Calendar export is the
//! mirror image: a minimal projection handed outward, with no knowledge of
//! provider formats.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::models::Plan;

/// Vets a freshly generated plan document before adoption.
pub fn validate_generated(plan: &Plan) -> Result<()> {
    plan.validate()?;
    if plan.weeks.is_empty() {
        return Err(CoreError::InvalidDocument {
            reason: "generated plan has no weeks".to_string(),
        });
    }
    Ok(())
}

/// Vets an extended plan document against the plan it extends.
///
/// The extension service replaces the document wholesale; the result must
/// keep every existing week and task untouched (same titles and execution
/// states, in order) and continue the week numbering sequentially. New weeks
/// land after the unlock frontier, so they are locked by construction.
pub fn validate_extension(current: &Plan, extended: &Plan) -> Result<()> {
    extended.validate()?;

    if extended.weeks.len() < current.weeks.len() {
        return Err(CoreError::InvalidDocument {
            reason: format!(
                "extension shrank the plan from {} to {} weeks",
                current.weeks.len(),
                extended.weeks.len()
            ),
        });
    }

    for (wi, (old, new)) in current.weeks.iter().zip(&extended.weeks).enumerate() {
        if old.week_number != new.week_number {
            return Err(CoreError::InvalidDocument {
                reason: format!(
                    "extension renumbered week at position {wi}: {} became {}",
                    old.week_number, new.week_number
                ),
            });
        }
        if old.tasks.len() != new.tasks.len() {
            return Err(CoreError::InvalidDocument {
                reason: format!(
                    "extension changed the task count of week {}",
                    old.week_number
                ),
            });
        }
        for (old_task, new_task) in old.tasks.iter().zip(&new.tasks) {
            if old_task.execution_state != new_task.execution_state {
                return Err(CoreError::InvalidDocument {
                    reason: format!(
                        "extension altered the execution state of '{}' in week {}",
                        old_task.title, old.week_number
                    ),
                });
            }
        }
    }

    Ok(())
}

/// A scheduled task exposed to the external calendar integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    /// Task title, used as the event summary
    pub title: String,
    /// Scheduled slot of the task
    pub scheduled_at: Timestamp,
    /// Estimated effort in hours, used as the event duration
    pub estimated_hours: f64,
}

/// Projects every scheduled task to a calendar event, in plan order.
pub fn calendar_events(plan: &Plan) -> Vec<CalendarEvent> {
    plan.tasks()
        .filter_map(|(_, _, task)| {
            task.scheduled_at.map(|scheduled_at| CalendarEvent {
                title: task.title.clone(),
                scheduled_at,
                estimated_hours: task.estimated_hours,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle;
    use crate::models::{Priority, Task, Week};

    fn plan(weeks: usize, tasks_per_week: usize) -> Plan {
        let mut plan = Plan::new("Goal", weeks as u32);
        for wi in 0..weeks {
            let mut week = Week::new(wi as u32 + 1, format!("Week {}", wi + 1));
            for i in 0..tasks_per_week {
                week.tasks
                    .push(Task::new(format!("W{wi}T{i}"), Priority::Medium, 1.0));
            }
            plan.weeks.push(week);
        }
        plan
    }

    #[test]
    fn test_validate_generated_rejects_empty() {
        assert!(validate_generated(&plan(0, 0)).is_err());
        assert!(validate_generated(&plan(2, 3)).is_ok());
    }

    #[test]
    fn test_extension_appends_weeks() {
        let current = plan(2, 2);
        let mut extended = current.clone();
        extended.weeks.push(Week::new(3, "Week 3"));
        extended.total_weeks = 3;
        assert!(validate_extension(&current, &extended).is_ok());
    }

    #[test]
    fn test_extension_must_not_touch_existing_states() {
        let mut current = plan(2, 2);
        lifecycle::complete(
            current.task_mut(0, 0).unwrap(),
            "2025-06-01T10:00:00Z".parse().unwrap(),
        )
        .unwrap();

        let mut extended = current.clone();
        extended.weeks.push(Week::new(3, "Week 3"));
        assert!(validate_extension(&current, &extended).is_ok());

        lifecycle::reopen(extended.task_mut(0, 0).unwrap()).unwrap();
        assert!(validate_extension(&current, &extended).is_err());
    }

    #[test]
    fn test_extension_must_continue_numbering() {
        let current = plan(2, 1);
        let mut extended = current.clone();
        extended.weeks.push(Week::new(5, "Week 5"));
        assert!(validate_extension(&current, &extended).is_err());
    }

    #[test]
    fn test_extension_cannot_shrink() {
        let current = plan(3, 1);
        let extended = plan(2, 1);
        assert!(validate_extension(&current, &extended).is_err());
    }

    #[test]
    fn test_calendar_events_only_scheduled_tasks() {
        let mut p = plan(1, 3);
        let slot: Timestamp = "2025-06-10T09:00:00Z".parse().unwrap();
        p.task_mut(0, 1).unwrap().scheduled_at = Some(slot);

        let events = calendar_events(&p);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "W0T1");
        assert_eq!(events[0].scheduled_at, slot);
        assert_eq!(events[0].estimated_hours, 1.0);
    }
}
