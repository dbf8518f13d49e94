//! Stored plan records and listing summaries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Plan;

/// A plan document as stored: the document plus its storage identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRecord {
    /// Storage identifier of the document row
    pub id: i64,

    /// Owning user
    pub user_id: String,

    /// The plan document itself
    pub plan: Plan,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the document was last replaced (UTC)
    pub updated_at: Timestamp,
}

/// Compact representation of a plan for listing contexts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    /// Storage identifier of the document row
    pub id: i64,

    /// Overview text of the plan
    pub overview: String,

    /// Planned horizon in weeks
    pub total_weeks: u32,

    /// Number of completed tasks
    pub completed_tasks: usize,

    /// Total number of tasks
    pub total_tasks: usize,

    /// Timestamp when the document was last replaced (UTC)
    pub updated_at: Timestamp,
}

/// A plan archived to history before deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Storage identifier of the original plan row
    pub plan_id: i64,

    /// Overview text of the archived plan
    pub overview: String,

    /// Timestamp the plan was archived (UTC)
    pub archived_at: Timestamp,
}
