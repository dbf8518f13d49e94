//! Daily scheduling and selection engine.
//!
//! Derives the "Today" list from the plan document plus a local date: which
//! tasks to show, which of them get focus, and how loaded the day looks
//! (the signal state). The engine is pure and holds no state of its own; it
//! re-runs on every relevant change and never mutates the document. Missed
//! tasks are surfaced as a notice only; rescheduling them is a user action
//! outside this engine.

use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::models::{Plan, Task, WeekState};
use crate::moves::week_states;

/// Coarse classification of the user's current daily load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    /// Few or no tasks today and no backlog
    Light,
    /// Ordinary load
    Normal,
    /// High missed-task backlog or a heavy today-count
    BurnoutRisk,
}

impl SignalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalState::Light => "light",
            SignalState::Normal => "normal",
            SignalState::BurnoutRisk => "burnout-risk",
        }
    }
}

impl std::fmt::Display for SignalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable load-classification constants.
///
/// The bands are heuristics, not law: everything that decides where
/// `light`/`normal`/`burnout-risk` begin lives here so callers can tune it.
#[derive(Debug, Clone)]
pub struct SignalThresholds {
    /// At most this many tasks today (with no backlog) classifies as light
    pub light_max_today: usize,
    /// This many missed tasks or more classifies as burnout-risk
    pub burnout_missed: usize,
    /// This many tasks today or more classifies as burnout-risk
    pub burnout_today: usize,
    /// Completions within the velocity window that relieve a
    /// today-count-only burnout classification
    pub velocity_relief: usize,
    /// How many trailing days count toward completion velocity
    pub velocity_window_days: u32,
    /// Focus window under normal or light load
    pub focus_normal: usize,
    /// Focus window under burnout-risk (compressed to reduce load)
    pub focus_burnout: usize,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            light_max_today: 1,
            burnout_missed: 4,
            burnout_today: 8,
            velocity_relief: 3,
            velocity_window_days: 3,
            focus_normal: 3,
            focus_burnout: 1,
        }
    }
}

/// A task selected for today, with its position in the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct TodayTask {
    /// Week position (0-indexed)
    pub week_index: usize,
    /// Task position within the week (0-indexed)
    pub task_index: usize,
    /// Snapshot of the task itself
    pub task: Task,
}

/// The derived "Today" view.
#[derive(Debug, Clone, PartialEq)]
pub struct TodayView {
    /// The local date the view was computed for
    pub date: Date,
    /// Load classification for the day
    pub signal: SignalState,
    /// How many incomplete tasks are emphasized
    pub focus_count: usize,
    /// Emphasized incomplete tasks, in working order
    pub focused: Vec<TodayTask>,
    /// Remaining incomplete tasks, visible but de-emphasized
    pub muted: Vec<TodayTask>,
    /// Today's tasks already completed
    pub completed: Vec<TodayTask>,
    /// Tasks scheduled strictly before today and still incomplete,
    /// surfaced as a non-blocking notice
    pub missed: Vec<TodayTask>,
}

impl TodayView {
    /// All incomplete tasks for today, focused first.
    pub fn incomplete(&self) -> impl Iterator<Item = &TodayTask> {
        self.focused.iter().chain(self.muted.iter())
    }
}

/// Local calendar date of a scheduled timestamp.
fn scheduled_date(task: &Task, tz: &TimeZone) -> Option<Date> {
    task.scheduled_at.map(|ts| ts.to_zoned(tz.clone()).date())
}

/// Computes the Today view for the given plan and local date.
///
/// `recent_completions` is the number of completions within the velocity
/// window (supplied by the caller from the streak log).
pub fn select_today(
    plan: &Plan,
    today: Date,
    tz: &TimeZone,
    recent_completions: usize,
    thresholds: &SignalThresholds,
) -> TodayView {
    let mut scheduled_today = Vec::new();
    let mut missed = Vec::new();

    for (wi, ti, task) in plan.tasks() {
        match scheduled_date(task, tz) {
            Some(date) if date == today => scheduled_today.push(TodayTask {
                week_index: wi,
                task_index: ti,
                task: task.clone(),
            }),
            Some(date) if date < today && task.is_incomplete() => missed.push(TodayTask {
                week_index: wi,
                task_index: ti,
                task: task.clone(),
            }),
            _ => {}
        }
    }

    // Nothing explicitly scheduled: fall back to the first few incomplete
    // tasks of the active week, so there is always something actionable.
    if scheduled_today.is_empty() {
        let states = week_states(plan);
        if let Some(active) = states.iter().position(|s| *s == WeekState::Active) {
            scheduled_today = plan.weeks[active]
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, task)| task.is_incomplete())
                .take(thresholds.focus_normal)
                .map(|(ti, task)| TodayTask {
                    week_index: active,
                    task_index: ti,
                    task: task.clone(),
                })
                .collect();
        }
    }

    let today_count = scheduled_today.len();
    let signal = classify(today_count, missed.len(), recent_completions, thresholds);
    let focus_count = match signal {
        SignalState::BurnoutRisk => thresholds.focus_burnout,
        SignalState::Light | SignalState::Normal => thresholds.focus_normal,
    };

    let (completed, mut incomplete): (Vec<_>, Vec<_>) = scheduled_today
        .into_iter()
        .partition(|t| t.task.completed());

    // Priority first; within equal priority earlier scheduled slots win and
    // unscheduled tasks sort last. The sort is stable, so plan order breaks
    // remaining ties.
    incomplete.sort_by(|a, b| {
        a.task
            .priority
            .rank()
            .cmp(&b.task.priority.rank())
            .then_with(|| match (a.task.scheduled_at, b.task.scheduled_at) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });

    let muted = incomplete.split_off(focus_count.min(incomplete.len()));

    TodayView {
        date: today,
        signal,
        focus_count,
        focused: incomplete,
        muted,
        completed,
        missed,
    }
}

/// Deterministic load classification from the day's indicators.
fn classify(
    today_count: usize,
    missed_count: usize,
    recent_completions: usize,
    thresholds: &SignalThresholds,
) -> SignalState {
    if missed_count >= thresholds.burnout_missed {
        return SignalState::BurnoutRisk;
    }
    if today_count >= thresholds.burnout_today && recent_completions < thresholds.velocity_relief {
        return SignalState::BurnoutRisk;
    }
    if missed_count == 0 && today_count <= thresholds.light_max_today {
        return SignalState::Light;
    }
    SignalState::Normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use jiff::Timestamp;

    use crate::lifecycle;
    use crate::models::{Priority, Week};

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn base_plan(task_count: usize) -> Plan {
        let mut plan = Plan::new("Goal", 1);
        let mut week = Week::new(1, "Kickoff");
        for i in 0..task_count {
            week.tasks
                .push(Task::new(format!("Task {i}"), Priority::Medium, 1.0));
        }
        plan.weeks.push(week);
        plan
    }

    fn today() -> Date {
        date(2025, 6, 10)
    }

    #[test]
    fn test_fallback_to_active_week() {
        // Scenario A: one week, three pending tasks, nothing scheduled.
        let plan = base_plan(3);
        let view = select_today(
            &plan,
            today(),
            &TimeZone::UTC,
            0,
            &SignalThresholds::default(),
        );

        assert_eq!(view.signal, SignalState::Normal);
        assert_eq!(view.focus_count, 3);
        assert_eq!(view.focused.len(), 3);
        assert!(view.muted.is_empty());
        assert!(view.missed.is_empty());
    }

    #[test]
    fn test_scheduled_today_takes_precedence_over_fallback() {
        let mut plan = base_plan(3);
        plan.task_mut(0, 2).unwrap().scheduled_at = Some(ts("2025-06-10T09:00:00Z"));

        let view = select_today(
            &plan,
            today(),
            &TimeZone::UTC,
            0,
            &SignalThresholds::default(),
        );
        assert_eq!(view.focused.len(), 1);
        assert_eq!(view.focused[0].task_index, 2);
    }

    #[test]
    fn test_completed_today_partitioned_out() {
        let mut plan = base_plan(2);
        plan.task_mut(0, 0).unwrap().scheduled_at = Some(ts("2025-06-10T09:00:00Z"));
        plan.task_mut(0, 1).unwrap().scheduled_at = Some(ts("2025-06-10T10:00:00Z"));
        lifecycle::complete(plan.task_mut(0, 0).unwrap(), ts("2025-06-10T09:30:00Z")).unwrap();

        let view = select_today(
            &plan,
            today(),
            &TimeZone::UTC,
            0,
            &SignalThresholds::default(),
        );
        assert_eq!(view.completed.len(), 1);
        assert_eq!(view.focused.len(), 1);
        assert_eq!(view.focused[0].task_index, 1);
    }

    #[test]
    fn test_missed_backlog_escalates_to_burnout() {
        // Scenario E: five tasks scheduled yesterday still pending, two today.
        let mut plan = base_plan(7);
        for i in 0..5 {
            plan.task_mut(0, i).unwrap().scheduled_at = Some(ts("2025-06-09T09:00:00Z"));
        }
        for i in 5..7 {
            plan.task_mut(0, i).unwrap().scheduled_at = Some(ts("2025-06-10T09:00:00Z"));
        }

        let thresholds = SignalThresholds::default();
        let view = select_today(&plan, today(), &TimeZone::UTC, 0, &thresholds);

        assert_eq!(view.missed.len(), 5);
        assert_eq!(view.signal, SignalState::BurnoutRisk);
        assert_eq!(view.focus_count, thresholds.focus_burnout);
        assert_eq!(view.focused.len(), 1);
        assert_eq!(view.muted.len(), 1);
    }

    #[test]
    fn test_light_day() {
        let mut plan = base_plan(3);
        // Only one task today, no backlog; the other two sit unscheduled but
        // are not selected because an explicit schedule exists.
        plan.task_mut(0, 0).unwrap().scheduled_at = Some(ts("2025-06-10T09:00:00Z"));

        let view = select_today(
            &plan,
            today(),
            &TimeZone::UTC,
            0,
            &SignalThresholds::default(),
        );
        assert_eq!(view.signal, SignalState::Light);
    }

    #[test]
    fn test_velocity_relieves_today_count_burnout() {
        let mut plan = base_plan(9);
        for i in 0..9 {
            plan.task_mut(0, i).unwrap().scheduled_at = Some(ts("2025-06-10T09:00:00Z"));
        }

        let thresholds = SignalThresholds::default();
        let slow = select_today(&plan, today(), &TimeZone::UTC, 0, &thresholds);
        assert_eq!(slow.signal, SignalState::BurnoutRisk);

        let fast = select_today(&plan, today(), &TimeZone::UTC, 4, &thresholds);
        assert_eq!(fast.signal, SignalState::Normal);
    }

    #[test]
    fn test_missed_burnout_ignores_velocity() {
        let mut plan = base_plan(5);
        for i in 0..5 {
            plan.task_mut(0, i).unwrap().scheduled_at = Some(ts("2025-06-01T09:00:00Z"));
        }
        let view = select_today(
            &plan,
            today(),
            &TimeZone::UTC,
            10,
            &SignalThresholds::default(),
        );
        assert_eq!(view.signal, SignalState::BurnoutRisk);
    }

    #[test]
    fn test_focus_order_priority_then_schedule() {
        let mut plan = base_plan(4);
        for (i, (priority, slot)) in [
            (Priority::Low, Some("2025-06-10T08:00:00Z")),
            (Priority::High, Some("2025-06-10T12:00:00Z")),
            (Priority::High, Some("2025-06-10T09:00:00Z")),
            (Priority::Medium, Some("2025-06-10T07:00:00Z")),
        ]
        .into_iter()
        .enumerate()
        {
            let task = plan.task_mut(0, i).unwrap();
            task.priority = priority;
            task.scheduled_at = slot.map(ts);
        }

        let view = select_today(
            &plan,
            today(),
            &TimeZone::UTC,
            0,
            &SignalThresholds::default(),
        );
        let order: Vec<usize> = view.incomplete().map(|t| t.task_index).collect();
        // High@09 before High@12, then Medium, then Low (muted).
        assert_eq!(order, vec![2, 1, 3, 0]);
        assert_eq!(view.focused.len(), 3);
        assert_eq!(view.muted.len(), 1);
    }

    #[test]
    fn test_earlier_slot_wins_within_equal_priority() {
        let mut plan = base_plan(2);
        plan.task_mut(0, 0).unwrap().scheduled_at = Some(ts("2025-06-10T10:00:00Z"));
        plan.task_mut(0, 1).unwrap().scheduled_at = Some(ts("2025-06-10T09:00:00Z"));

        let view = select_today(
            &plan,
            today(),
            &TimeZone::UTC,
            0,
            &SignalThresholds::default(),
        );
        let order: Vec<usize> = view.incomplete().map(|t| t.task_index).collect();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_fallback_skips_completed_and_spans_active_week_only() {
        let mut plan = base_plan(3);
        let mut week2 = Week::new(2, "Later");
        week2.tasks.push(Task::new("Future", Priority::High, 1.0));
        plan.weeks.push(week2);
        lifecycle::complete(plan.task_mut(0, 0).unwrap(), ts("2025-06-09T10:00:00Z")).unwrap();

        let view = select_today(
            &plan,
            today(),
            &TimeZone::UTC,
            0,
            &SignalThresholds::default(),
        );
        let picked: Vec<(usize, usize)> = view
            .incomplete()
            .map(|t| (t.week_index, t.task_index))
            .collect();
        assert_eq!(picked, vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_fully_complete_plan_has_empty_today() {
        let mut plan = base_plan(2);
        for i in 0..2 {
            lifecycle::complete(plan.task_mut(0, i).unwrap(), ts("2025-06-09T10:00:00Z")).unwrap();
        }
        let view = select_today(
            &plan,
            today(),
            &TimeZone::UTC,
            2,
            &SignalThresholds::default(),
        );
        assert!(view.focused.is_empty());
        assert!(view.muted.is_empty());
        assert_eq!(view.signal, SignalState::Light);
    }
}
