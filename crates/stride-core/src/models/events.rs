//! Celebration events raised by completion transitions.

use serde::{Deserialize, Serialize};

/// One-time events reported to the caller when a completion transition
/// crosses a boundary.
///
/// Edge-triggered: an event fires when the previous state was incomplete and
/// the new state is complete, and each is deduplicated per week / per plan
/// within a loaded session so repeated reads never refire it. Events are
/// reported, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanEvent {
    /// Every task in the named week just became done
    WeekCompleted { week_number: u32 },

    /// Every task in every week just became done
    PlanCompleted,
}
