//! Display implementations for domain models and derived views.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::aggregate::Progress;
use crate::intake::CalendarEvent;
use crate::models::{HistoryEntry, Plan, PlanSummary, Task, Week};
use crate::schedule::{TodayTask, TodayView};

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}, {:.1}h",
            self.execution_state.with_icon(),
            self.title,
            self.priority,
            self.estimated_hours
        )?;
        if self.time_spent_seconds > 0 {
            write!(f, ", {} spent", format_duration(self.time_spent_seconds))?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Week {}: {}", self.week_number, self.focus)?;
        writeln!(f)?;
        if self.tasks.is_empty() {
            writeln!(f, "No tasks this week.")?;
        } else {
            for (i, task) in self.tasks.iter().enumerate() {
                writeln!(f, "{}. {task}", i + 1)?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.overview)?;
        writeln!(f)?;
        writeln!(f, "- Weeks: {}", self.total_weeks)?;
        if self.is_open_ended {
            writeln!(f, "- Open-ended")?;
        }
        if let Some(identity) = &self.identity_statement {
            writeln!(f, "- Identity: {identity}")?;
        }
        writeln!(f)?;

        for week in &self.weeks {
            write!(f, "{week}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) ({}/{})",
            self.overview, self.id, self.completed_tasks, self.total_tasks
        )?;
        writeln!(f)?;
        writeln!(f, "- **Weeks**: {}", self.total_weeks)?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} (plan {}, archived {})",
            self.overview,
            self.plan_id,
            LocalDateTime(&self.archived_at)
        )
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} tasks done ({}%)",
            self.completed, self.total, self.percent
        )
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} at {} ({:.1}h)",
            self.title,
            LocalDateTime(&self.scheduled_at),
            self.estimated_hours
        )
    }
}

fn fmt_today_task(f: &mut fmt::Formatter<'_>, item: &TodayTask) -> fmt::Result {
    writeln!(
        f,
        "- {} (week {}, position {})",
        item.task,
        item.week_index + 1,
        item.task_index + 1
    )
}

impl fmt::Display for TodayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Today: {}", self.date)?;
        writeln!(f)?;
        writeln!(f, "- Signal: {}", self.signal)?;
        writeln!(f, "- Focus window: {}", self.focus_count)?;
        writeln!(f)?;

        if self.focused.is_empty() && self.muted.is_empty() && self.completed.is_empty() {
            writeln!(f, "Nothing on the list today.")?;
        }

        if !self.focused.is_empty() {
            writeln!(f, "## Focused")?;
            writeln!(f)?;
            for item in &self.focused {
                fmt_today_task(f, item)?;
            }
            writeln!(f)?;
        }

        if !self.muted.is_empty() {
            writeln!(f, "## Later")?;
            writeln!(f)?;
            for item in &self.muted {
                fmt_today_task(f, item)?;
            }
            writeln!(f)?;
        }

        if !self.completed.is_empty() {
            writeln!(f, "## Done today")?;
            writeln!(f)?;
            for item in &self.completed {
                fmt_today_task(f, item)?;
            }
            writeln!(f)?;
        }

        if !self.missed.is_empty() {
            writeln!(
                f,
                "Heads up: {} task(s) were scheduled before today and are still open.",
                self.missed.len()
            )?;
        }

        Ok(())
    }
}

/// Compact `1h 23m 45s` rendering of a second count.
fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
