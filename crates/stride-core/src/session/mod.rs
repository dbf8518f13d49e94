//! High-level session API coordinating the execution core.
//!
//! The [`Session`] owns the single in-memory plan document for the current
//! user and routes every mutation through the same discipline:
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │  Validation  │    │  Pure transition │    │  Store write     │
//! │ (timer/lock  │───▶│ (lifecycle,      │───▶│ (whole-document  │
//! │  invariants) │    │  move engine)    │    │  replace)        │
//! └──────────────┘    └──────────────────┘    └──────────────────┘
//!                                                  │ on failure
//!                                                  ▼
//!                                             snapshot rollback
//! ```
//!
//! Mutations apply optimistically to the in-memory plan before the store
//! write is issued, so callers see their intent immediately; a failed write
//! restores the pre-mutation snapshot and surfaces the storage error. No
//! retry policy lives here. The read models (Today view, progress, streak)
//! are pure projections and never write.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task;

use crate::aggregate::StreakPolicy;
use crate::clock::Clock;
use crate::error::{CoreError, Result};
use crate::models::{ActiveTimer, Plan};
use crate::schedule::SignalThresholds;
use crate::store::Store;
use crate::timer::TimerController;

pub mod builder;
mod plan_ops;
mod task_ops;
mod views;

pub use builder::SessionBuilder;

/// Main session interface for executing a plan day by day.
pub struct Session {
    pub(crate) db_path: PathBuf,
    pub(crate) user_id: String,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) thresholds: SignalThresholds,
    pub(crate) streak_policy: StreakPolicy,
    pub(crate) plan_id: Option<i64>,
    pub(crate) plan: Option<Plan>,
    pub(crate) timer: TimerController,
    pub(crate) celebrated_weeks: HashSet<u32>,
}

impl Session {
    /// The loaded plan document, if any.
    pub fn current_plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// The active timer, if a task is being timed.
    pub fn active_timer(&self) -> Option<&ActiveTimer> {
        self.timer.active()
    }

    /// The user this session operates for.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Storage id and document of the loaded plan, or `NoPlanLoaded`.
    pub(crate) fn loaded(&self) -> Result<(i64, &Plan)> {
        match (self.plan_id, &self.plan) {
            (Some(id), Some(plan)) => Ok((id, plan)),
            _ => Err(CoreError::NoPlanLoaded),
        }
    }

    /// Runs a closure against a fresh store connection on the blocking pool.
    pub(crate) async fn run_store<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Store) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut store = Store::new(&db_path)?;
            f(&mut store)
        })
        .await
        .map_err(|e| CoreError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Resets all in-memory state tied to a loaded plan.
    pub(crate) fn clear_loaded_state(&mut self) {
        self.plan_id = None;
        self.plan = None;
        self.timer = TimerController::new();
        self.celebrated_weeks.clear();
    }

    /// Rebuilds timer and celebration state from the given plan.
    ///
    /// Weeks already complete are marked celebrated so loading (or
    /// re-reading) a finished week never refires its event.
    pub(crate) fn adopt_in_memory(&mut self, id: i64, plan: Plan) {
        self.timer = TimerController::new();
        self.timer.recover(&plan);
        self.celebrated_weeks = plan
            .weeks
            .iter()
            .filter(|w| !w.tasks.is_empty() && w.is_complete())
            .map(|w| w.week_number)
            .collect();
        self.plan_id = Some(id);
        self.plan = Some(plan);
    }
}
