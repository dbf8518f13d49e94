//! Plan document operations for the Session.

use log::{info, warn};

use super::Session;
use crate::aggregate;
use crate::error::{CoreError, Result};
use crate::intake;
use crate::models::{HistoryEntry, Plan, PlanSummary};
use crate::moves;
use crate::params::MoveTask;

impl Session {
    /// Loads the user's most recent plan from the store.
    ///
    /// Invariant violations found in the stored document (two doing tasks,
    /// stray timestamps) are repaired opportunistically and logged; the
    /// repaired document is written back best-effort. The active timer is
    /// reconstructed from the doing task's start timestamp, so elapsed time
    /// continues across sessions.
    pub async fn load(&mut self) -> Result<bool> {
        let user_id = self.user_id.clone();
        let record = self
            .run_store(move |store| store.latest_plan(&user_id))
            .await?;

        let Some(mut record) = record else {
            self.clear_loaded_state();
            return Ok(false);
        };

        let now = self.clock.now();
        let notes = record.plan.normalize(now);
        for note in &notes {
            warn!("plan {} normalization: {note}", record.id);
        }
        if !notes.is_empty() {
            let id = record.id;
            let plan = record.plan.clone();
            if let Err(e) = self
                .run_store(move |store| store.save_plan(id, &plan, None, now))
                .await
            {
                // Keep the repaired document in memory regardless; the next
                // successful write persists it.
                warn!("failed to persist normalized plan {id}: {e}");
            }
        }

        self.adopt_in_memory(record.id, record.plan);
        Ok(true)
    }

    /// Adopts a freshly generated plan document as the user's current plan.
    ///
    /// The document is validated against the model invariants before
    /// anything is stored (the generation service is opaque and untrusted).
    pub async fn adopt_plan(&mut self, plan: Plan) -> Result<PlanSummary> {
        intake::validate_generated(&plan)?;

        let user_id = self.user_id.clone();
        let now = self.clock.now();
        let stored = plan.clone();
        let record = self
            .run_store(move |store| store.create_plan(&user_id, &stored, now))
            .await?;

        info!("adopted plan {} for user {}", record.id, record.user_id);
        let progress = aggregate::progress(&plan);
        self.adopt_in_memory(record.id, plan);

        let (_, plan) = self.loaded()?;
        Ok(PlanSummary {
            id: record.id,
            overview: plan.overview.clone(),
            total_weeks: plan.total_weeks,
            completed_tasks: progress.completed,
            total_tasks: progress.total,
            updated_at: record.updated_at,
        })
    }

    /// Replaces the current plan with its extension.
    ///
    /// The extension service returns a whole new document; it must keep
    /// every existing week and task untouched and continue the numbering.
    pub async fn extend_plan(&mut self, extended: Plan) -> Result<()> {
        let (id, current) = self.loaded()?;
        intake::validate_extension(current, &extended)?;

        let snapshot = self.plan.replace(extended);
        if let Err(e) = self.persist_document(id).await {
            self.plan = snapshot;
            return Err(e);
        }

        // Week indices are unchanged by an append, but rebuild derived
        // state anyway so new complete-by-construction weeks are tracked.
        let plan = self.plan.take().ok_or(CoreError::NoPlanLoaded)?;
        self.adopt_in_memory(id, plan);
        Ok(())
    }

    /// Archives the current plan to history and deletes it.
    pub async fn delete_plan(&mut self) -> Result<()> {
        let (id, _) = self.loaded()?;
        let now = self.clock.now();
        self.run_store(move |store| store.archive_and_delete_plan(id, now))
            .await?;

        info!("archived and deleted plan {id}");
        self.clear_loaded_state();
        Ok(())
    }

    /// Moves a task between positions, subject to the lock rules.
    ///
    /// The move engine validates and produces a whole new document; the
    /// store write is a single atomic replace, so a failed save can never
    /// leave a half-moved plan behind.
    pub async fn move_task(&mut self, request: &MoveTask) -> Result<()> {
        let (id, plan) = self.loaded()?;
        let moved = moves::move_task(plan, request)?;

        let snapshot = self.plan.replace(moved);
        if let Err(e) = self.persist_document(id).await {
            self.plan = snapshot;
            return Err(e);
        }

        // A move can shift the doing task's position; re-derive the timer
        // from the document rather than patching indices. The plan-completion
        // one-shot is untouched: a move never constitutes a reload.
        if let Some(plan) = &self.plan {
            self.timer.recover_timer(plan);
        }
        Ok(())
    }

    /// Archived plans for this user, newest first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let user_id = self.user_id.clone();
        self.run_store(move |store| store.history(&user_id)).await
    }

    /// Replaces the stored document with the in-memory plan.
    async fn persist_document(&self, id: i64) -> Result<()> {
        let plan = self.plan.as_ref().ok_or(CoreError::NoPlanLoaded)?.clone();
        let now = self.clock.now();
        self.run_store(move |store| store.save_plan(id, &plan, None, now))
            .await
    }
}
