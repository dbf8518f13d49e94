//! Core library for the Stride goal execution application.
//!
//! Stride turns a goal into a multi-week plan of tasks and executes it day
//! by day. This crate provides the execution core behind that product: the
//! plan/task state machine, the execution timer, the daily Today selection,
//! the cross-week move and lock rules, and the streak/progress read models,
//! all over a single plan document persisted as a whole in SQLite.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────────┐    ┌─────────────────┐
//! │     Session     │    │   Pure engines       │    │      Store      │
//! │ (optimistic     │───▶│ (lifecycle, timer,   │───▶│ (whole-document │
//! │  apply+rollback)│    │  schedule, moves,    │    │  replace, SQLite)│
//! │                 │    │  aggregate, intake)  │    │                 │
//! └─────────────────┘    └──────────────────────┘    └─────────────────┘
//! ```
//!
//! UI events call into the [`Session`], which validates against the model
//! invariants, applies a pure transition producing a new plan document, and
//! persists it as a single atomic replace. The [`schedule`] and
//! [`aggregate`] modules are read-only consumers; they never mutate the
//! document.
//!
//! # Quick Start
//!
//! ```rust
//! use stride_core::{SessionBuilder, models::{Plan, Priority, Task, Week}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = SessionBuilder::new()
//!     .with_database_path(Some("stride.db"))
//!     .build()
//!     .await?;
//!
//! // Adopt a generated plan document
//! let mut plan = Plan::new("Learn Rust", 2);
//! let mut week = Week::new(1, "Fundamentals");
//! week.tasks.push(Task::new("Read the book intro", Priority::High, 2.0));
//! plan.weeks.push(week);
//! plan.weeks.push(Week::new(2, "Practice"));
//! session.adopt_plan(plan).await?;
//!
//! // Work through it
//! use stride_core::params::TaskRef;
//! session.start_task(&TaskRef { week_index: 0, task_index: 0 }).await?;
//! let events = session.complete_task(&TaskRef { week_index: 0, task_index: 0 }).await?;
//! println!("progress: {}", session.progress()?);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod clock;
pub mod display;
pub mod error;
pub mod intake;
pub mod lifecycle;
pub mod models;
pub mod moves;
pub mod params;
pub mod schedule;
pub mod session;
pub mod store;
pub mod timer;

// Re-export commonly used types
pub use aggregate::{Progress, StreakPolicy};
pub use clock::{Clock, FixedClock, SystemClock};
pub use display::LocalDateTime;
pub use error::{CoreError, Result};
pub use intake::CalendarEvent;
pub use models::{
    ActiveTimer, ExecutionState, HistoryEntry, Plan, PlanEvent, PlanRecord, PlanSummary, Priority,
    Task, Week, WeekState,
};
pub use params::{MoveTask, TaskRef};
pub use schedule::{SignalState, SignalThresholds, TodayTask, TodayView};
pub use session::{Session, SessionBuilder};
pub use store::Store;
pub use timer::TimerController;
