//! Task lifecycle operations for the Session.
//!
//! Each operation validates against the timer invariant, applies the pure
//! transition to the in-memory plan, then persists the whole document; a
//! failed write rolls the in-memory state back to the pre-mutation snapshot.

use log::debug;

use super::Session;
use crate::aggregate::{self, StreakPolicy};
use crate::error::{CoreError, Result};
use crate::lifecycle;
use crate::models::PlanEvent;
use crate::params::TaskRef;
use crate::store::StreakUpdate;

impl Session {
    /// Starts the timer on a pending task.
    ///
    /// Fails with `TimerConflict` if another task is already doing; the
    /// caller must pause or complete it first (pause-then-start and
    /// complete-then-start are two explicit transitions, each persisted,
    /// so the single-active-timer invariant holds at every observable
    /// instant).
    pub async fn start_task(&mut self, task_ref: &TaskRef) -> Result<()> {
        let now = self.clock.now();
        self.timer.ensure_idle()?;
        let (id, _) = self.loaded()?;

        let plan = self.plan.as_mut().ok_or(CoreError::NoPlanLoaded)?;
        let snapshot = plan.clone();
        let timer_snapshot = self.timer.clone();

        let task = plan
            .task_mut(task_ref.week_index, task_ref.task_index)
            .ok_or(CoreError::TaskNotFound {
                week_index: task_ref.week_index,
                task_index: task_ref.task_index,
            })?;
        lifecycle::start(task, now)?;
        let title = task.title.clone();
        self.timer
            .begin(task_ref.week_index, task_ref.task_index, title, now);

        if let Err(e) = self.persist(id, None).await {
            self.plan = Some(snapshot);
            self.timer = timer_snapshot;
            return Err(e);
        }
        Ok(())
    }

    /// Pauses the doing task, banking its elapsed time.
    pub async fn pause_task(&mut self, task_ref: &TaskRef) -> Result<()> {
        let now = self.clock.now();
        let (id, _) = self.loaded()?;

        let plan = self.plan.as_mut().ok_or(CoreError::NoPlanLoaded)?;
        let snapshot = plan.clone();
        let timer_snapshot = self.timer.clone();

        let task = plan
            .task_mut(task_ref.week_index, task_ref.task_index)
            .ok_or(CoreError::TaskNotFound {
                week_index: task_ref.week_index,
                task_index: task_ref.task_index,
            })?;
        lifecycle::pause(task, now)?;
        self.timer.clear();

        if let Err(e) = self.persist(id, None).await {
            self.plan = Some(snapshot);
            self.timer = timer_snapshot;
            return Err(e);
        }
        Ok(())
    }

    /// Completes a task (from pending or doing) and credits today in the
    /// streak log.
    ///
    /// Returns the celebration events this completion triggered: a
    /// week-completed event the first time the task's week becomes complete,
    /// and a plan-completed event at most once per loaded session.
    pub async fn complete_task(&mut self, task_ref: &TaskRef) -> Result<Vec<PlanEvent>> {
        let now = self.clock.now();
        let today = self.clock.today();
        let (id, _) = self.loaded()?;

        let plan = self.plan.as_mut().ok_or(CoreError::NoPlanLoaded)?;
        let snapshot = plan.clone();
        let timer_snapshot = self.timer.clone();

        let week_number = plan
            .weeks
            .get(task_ref.week_index)
            .ok_or(CoreError::TaskNotFound {
                week_index: task_ref.week_index,
                task_index: task_ref.task_index,
            })?
            .week_number;

        let task = plan
            .task_mut(task_ref.week_index, task_ref.task_index)
            .ok_or(CoreError::TaskNotFound {
                week_index: task_ref.week_index,
                task_index: task_ref.task_index,
            })?;
        lifecycle::complete(task, now)?;

        if self
            .timer
            .active()
            .is_some_and(|t| (t.week_index, t.task_index) == (task_ref.week_index, task_ref.task_index))
        {
            self.timer.clear();
        }

        // Edge-triggered celebrations: the week event fires only when this
        // completion flipped the week and the week was not already credited
        // this session.
        let mut events = Vec::new();
        let plan = self.plan.as_ref().ok_or(CoreError::NoPlanLoaded)?;
        if plan.weeks[task_ref.week_index].is_complete()
            && !self.celebrated_weeks.contains(&week_number)
        {
            events.push(PlanEvent::WeekCompleted { week_number });
        }
        if let Some(event) = self.timer.check_plan_completion(plan) {
            events.push(event);
        }

        if let Err(e) = self.persist(id, Some(StreakUpdate::Credit(today))).await {
            self.plan = Some(snapshot);
            self.timer = timer_snapshot;
            return Err(e);
        }

        for event in &events {
            if let PlanEvent::WeekCompleted { week_number } = event {
                self.celebrated_weeks.insert(*week_number);
            }
        }
        debug!("completed task at {task_ref:?}, {} event(s)", events.len());
        Ok(events)
    }

    /// Reopens a done task (undo/uncheck).
    ///
    /// Whether the day's streak credit survives is governed by the
    /// configured [`StreakPolicy`].
    pub async fn reopen_task(&mut self, task_ref: &TaskRef) -> Result<()> {
        let (id, _) = self.loaded()?;
        let tz = self.clock.time_zone();

        let plan = self.plan.as_mut().ok_or(CoreError::NoPlanLoaded)?;
        let snapshot = plan.clone();

        let week_number = plan
            .weeks
            .get(task_ref.week_index)
            .ok_or(CoreError::TaskNotFound {
                week_index: task_ref.week_index,
                task_index: task_ref.task_index,
            })?
            .week_number;

        let task = plan
            .task_mut(task_ref.week_index, task_ref.task_index)
            .ok_or(CoreError::TaskNotFound {
                week_index: task_ref.week_index,
                task_index: task_ref.task_index,
            })?;
        let prior_completed_at = task.completed_at;
        lifecycle::reopen(task)?;

        let plan = self.plan.as_ref().ok_or(CoreError::NoPlanLoaded)?;
        let streak = match (self.streak_policy, prior_completed_at) {
            (StreakPolicy::RevokeIfLastCredit, Some(ts)) => {
                let day = ts.to_zoned(tz.clone()).date();
                if aggregate::completions_on(plan, day, &tz) == 0 {
                    Some(StreakUpdate::Revoke(day))
                } else {
                    None
                }
            }
            _ => None,
        };

        if let Err(e) = self.persist(id, streak).await {
            self.plan = Some(snapshot);
            return Err(e);
        }

        // The week is incomplete again; completing it anew is a fresh edge.
        self.celebrated_weeks.remove(&week_number);
        Ok(())
    }

    /// Replaces the stored document with the in-memory plan, optionally
    /// folding a streak-log change into the same transaction.
    async fn persist(&self, id: i64, streak: Option<StreakUpdate>) -> Result<()> {
        let plan = self.plan.as_ref().ok_or(CoreError::NoPlanLoaded)?.clone();
        let user_id = self.user_id.clone();
        let now = self.clock.now();
        self.run_store(move |store| {
            store.save_plan(id, &plan, streak.map(|update| (user_id.as_str(), update)), now)
        })
        .await
    }
}
