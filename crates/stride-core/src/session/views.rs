//! Read-only projections exposed by the Session.
//!
//! These consume the plan document and the completion-date log; they never
//! mutate either.

use super::Session;
use crate::aggregate::{self, Progress};
use crate::error::Result;
use crate::intake::{self, CalendarEvent};
use crate::models::WeekState;
use crate::moves;
use crate::schedule::{self, TodayView};

impl Session {
    /// Computes the Today view for the current local date.
    pub async fn today(&self) -> Result<TodayView> {
        let (_, plan) = self.loaded()?;
        let today = self.clock.today();
        let tz = self.clock.time_zone();

        // Completion velocity: how many of the trailing window days have at
        // least one completion credited.
        let user_id = self.user_id.clone();
        let days = self
            .run_store(move |store| store.completion_days(&user_id))
            .await?;
        let mut recent = 0;
        let mut cursor = today;
        for _ in 0..self.thresholds.velocity_window_days {
            if days.contains(&cursor) {
                recent += 1;
            }
            match cursor.yesterday() {
                Ok(prev) => cursor = prev,
                Err(_) => break,
            }
        }

        Ok(schedule::select_today(
            plan,
            today,
            &tz,
            recent,
            &self.thresholds,
        ))
    }

    /// Plan-wide completion progress.
    pub fn progress(&self) -> Result<Progress> {
        let (_, plan) = self.loaded()?;
        Ok(aggregate::progress(plan))
    }

    /// Current streak of consecutive completion days.
    pub async fn streak(&self) -> Result<u32> {
        let user_id = self.user_id.clone();
        let days = self
            .run_store(move |store| store.completion_days(&user_id))
            .await?;
        Ok(aggregate::streak(&days, self.clock.today()))
    }

    /// Derived lock classification for every week.
    pub fn week_states(&self) -> Result<Vec<WeekState>> {
        let (_, plan) = self.loaded()?;
        Ok(moves::week_states(plan))
    }

    /// Scheduled tasks projected for the external calendar integration.
    pub fn calendar_events(&self) -> Result<Vec<CalendarEvent>> {
        let (_, plan) = self.loaded()?;
        Ok(intake::calendar_events(plan))
    }

    /// Elapsed seconds to display for the active task, if a timer runs.
    ///
    /// Presentation-only: the periodic tick reads this, it never writes.
    pub fn elapsed(&self) -> Option<u64> {
        let timer = self.timer.active()?;
        let plan = self.plan.as_ref()?;
        let task = plan.task(timer.week_index, timer.task_index)?;
        Some(self.timer.elapsed(task, self.clock.now()))
    }
}
