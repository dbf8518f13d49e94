//! Data models for plans, weeks, and tasks.
//!
//! This module contains the core domain models of the stride execution
//! system. The plan document is the canonical nested structure
//! (plan → weeks → tasks); everything else here is either derived from it
//! ([`WeekState`], events, summaries) or ephemeral session state
//! ([`ActiveTimer`]).
//!
//! Display implementations for these models live in
//! [`crate::display::models`] to keep data structures separate from
//! presentation.
//!
//! # Invariants
//!
//! - `weeks` are ordered by ascending week number with no gaps.
//! - `completed_at` is present iff a task is `Done`; `execution_started_at`
//!   is present iff a task is `Doing`.
//! - At most one task across the whole plan is `Doing` at any time.
//!
//! [`Plan::validate`] checks these on documents arriving from outside;
//! [`Plan::normalize`] repairs violations found in stored documents
//! opportunistically rather than crashing.

pub mod events;
pub mod plan;
pub mod record;
pub mod status;
pub mod task;
pub mod timer;

// Re-export all public types at the models level
pub use events::PlanEvent;
pub use plan::{Plan, Week};
pub use record::{HistoryEntry, PlanRecord, PlanSummary};
pub use status::{ExecutionState, Priority, WeekState};
pub use task::Task;
pub use timer::ActiveTimer;
