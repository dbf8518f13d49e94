//! Parameter structures for stride operations.
//!
//! Shared parameter structures usable across interfaces (CLI today, others
//! later) without framework-specific derives. Interface layers wrap these
//! with their own derives (clap args, etc.) and convert via `From`/`Into`.

use serde::{Deserialize, Serialize};

/// Position of a task within the plan document.
///
/// Used for start, pause, complete, and reopen operations.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskRef {
    /// Week position (0-indexed)
    pub week_index: usize,
    /// Task position within the week (0-indexed)
    pub task_index: usize,
}

/// Parameters for moving a task between positions.
///
/// `source_week == dest_week` is a same-week reorder; `dest_index` is the
/// position in the destination week after the task has been removed from the
/// source.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveTask {
    /// Week the task is moved out of (0-indexed)
    pub source_week: usize,
    /// Position of the task within the source week (0-indexed)
    pub source_index: usize,
    /// Week the task is moved into (0-indexed)
    pub dest_week: usize,
    /// Insertion position within the destination week (0-indexed)
    pub dest_index: usize,
}
