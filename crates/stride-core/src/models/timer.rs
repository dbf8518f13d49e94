//! Active timer model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// The at-most-one task currently being timed.
///
/// Ephemeral session state, never persisted: after a reload it is
/// reconstructed from the `Doing` task's own start timestamp, so elapsed
/// time survives sessions without any extra bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveTimer {
    /// Position of the week holding the timed task
    pub week_index: usize,

    /// Position of the timed task within its week
    pub task_index: usize,

    /// Title of the timed task, surfaced on conflicts so the caller can
    /// offer pause-and-switch or complete-and-switch
    pub task_title: String,

    /// Instant the current run started
    pub started_at: Timestamp,
}
