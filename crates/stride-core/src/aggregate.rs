//! Streak and progress aggregators.
//!
//! Pure read models over the plan document and the completion-date log.
//! Nothing here caches or mutates; both values are recomputed on every read.

use std::collections::BTreeSet;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{Plan, Task};

/// Completion progress across the whole plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    /// Number of tasks whose execution state is done
    pub completed: usize,
    /// Total number of tasks
    pub total: usize,
    /// Rounded completion percentage; 0 for an empty plan, 100 only when
    /// every task is done
    pub percent: u8,
}

/// Computes plan-wide completion progress.
pub fn progress(plan: &Plan) -> Progress {
    let total = plan.total_tasks();
    let completed = plan.tasks().filter(|(_, _, t)| t.completed()).count();
    Progress {
        completed,
        total,
        percent: percent_of(completed, total),
    }
}

/// Rounded percentage, clamped so 100 means exact completion.
fn percent_of(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    if completed == total {
        return 100;
    }
    let rounded = (100.0 * completed as f64 / total as f64).round() as u8;
    rounded.min(99)
}

/// How a completion undo interacts with an already-granted streak credit.
///
/// The observed product behavior never reverses a credit; whether that is
/// lenience or a bug is unresolved, so both answers are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreakPolicy {
    /// A day's credit survives even if every completion that earned it is
    /// undone (matches observed behavior)
    #[default]
    KeepCredit,
    /// Reopening removes the day's credit when the reopened task was the
    /// only completion recorded for that day
    RevokeIfLastCredit,
}

/// Streak value for a set of distinct completion dates.
///
/// Counts the maximal trailing run of consecutive calendar days ending today
/// (or yesterday, if today has no entry yet). Multiple completions on one
/// day are a no-op for the log, so the streak is idempotent per day; a
/// missed day resets the count.
pub fn streak(days: &BTreeSet<Date>, today: Date) -> u32 {
    let anchor = if days.contains(&today) {
        today
    } else {
        match today.yesterday() {
            Ok(y) if days.contains(&y) => y,
            _ => return 0,
        }
    };

    let mut count = 1;
    let mut cursor = anchor;
    while let Ok(prev) = cursor.yesterday() {
        if !days.contains(&prev) {
            break;
        }
        count += 1;
        cursor = prev;
    }
    count
}

/// Tasks completed on a given local calendar day, per their completion
/// timestamps. Used to decide whether a reopened task was the day's only
/// completion.
pub fn completions_on(plan: &Plan, day: Date, tz: &jiff::tz::TimeZone) -> usize {
    plan.tasks()
        .filter_map(|(_, _, task): (_, _, &Task)| task.completed_at)
        .filter(|ts| ts.to_zoned(tz.clone()).date() == day)
        .count()
}
