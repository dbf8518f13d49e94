//! Command-line argument definitions using clap's derive API.
//!
//! Argument structs here are thin wrappers over the core parameter types:
//! clap concerns (help text, aliases, 1-based positions for humans) stay in
//! this layer, and each wrapper converts explicitly into the core type the
//! session consumes.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use stride_core::params::{MoveTask, TaskRef};

/// Main command-line interface for the Stride goal execution tool
///
/// Stride turns a goal into a multi-week plan and helps execute it day by
/// day: start and complete tasks with a live timer, check the Today view for
/// what to work on, and watch streak and progress build as weeks unlock.
#[derive(Parser)]
#[command(version, about, name = "stride")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stride/stride.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Stride CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the plan document
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Work on tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show today's focused task list
    Today,
    /// Show the current completion streak
    Streak,
    /// List scheduled tasks as calendar events
    Calendar,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the current plan with week states
    #[command(alias = "s")]
    Show,
    /// Adopt a generated plan document from a JSON file
    #[command(alias = "a")]
    Adopt(AdoptPlanArgs),
    /// Replace the plan with an extended version from a JSON file
    #[command(alias = "e")]
    Extend(ExtendPlanArgs),
    /// Archive the current plan and remove it
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// List archived plans
    #[command(alias = "h")]
    History,
    /// Show overall completion progress
    Progress,
}

/// Adopt a generated plan document
///
/// The file must contain a full plan document in JSON form. Adoption
/// validates the document before anything is stored, so a malformed or
/// inconsistent plan is rejected whole.
#[derive(ClapArgs)]
pub struct AdoptPlanArgs {
    /// Path to the plan document JSON file
    pub file: PathBuf,
}

/// Extend the current plan with additional weeks
///
/// The file must contain the current plan document with new weeks appended.
/// Existing weeks, tasks, and their execution states must be unchanged; an
/// extension that shrinks or rewrites history is rejected.
#[derive(ClapArgs)]
pub struct ExtendPlanArgs {
    /// Path to the extended plan document JSON file
    pub file: PathBuf,
}

/// Delete the current plan
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Start the execution timer on a task
    #[command(alias = "s")]
    Start(TaskPositionArgs),
    /// Pause the running task, banking elapsed time
    #[command(alias = "p")]
    Pause(TaskPositionArgs),
    /// Mark a task done
    #[command(alias = "c")]
    Complete(TaskPositionArgs),
    /// Reopen a completed task
    #[command(alias = "r")]
    Reopen(TaskPositionArgs),
    /// Move a task to another week or position
    #[command(alias = "m")]
    Move(MoveTaskArgs),
}

/// A task position addressed the way the plan displays it: week numbers and
/// task positions are 1-based on the command line.
#[derive(ClapArgs)]
pub struct TaskPositionArgs {
    /// Week number (1-based)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub week: u32,
    /// Task position within the week (1-based)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub position: u32,
}

impl From<TaskPositionArgs> for TaskRef {
    fn from(val: TaskPositionArgs) -> Self {
        TaskRef {
            week_index: (val.week - 1) as usize,
            task_index: (val.position - 1) as usize,
        }
    }
}

/// Move a task between weeks
///
/// Destination position may be one past the last task to append. Moves into
/// or out of locked weeks are rejected; reorders within one week are always
/// allowed.
#[derive(ClapArgs)]
pub struct MoveTaskArgs {
    /// Source week number (1-based)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub week: u32,
    /// Source task position (1-based)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub position: u32,
    /// Destination week number (1-based)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub to_week: u32,
    /// Destination position (1-based; one past the end appends)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub to_position: u32,
}

impl From<MoveTaskArgs> for MoveTask {
    fn from(val: MoveTaskArgs) -> Self {
        MoveTask {
            source_week: (val.week - 1) as usize,
            source_index: (val.position - 1) as usize,
            dest_week: (val.to_week - 1) as usize,
            dest_index: (val.to_position - 1) as usize,
        }
    }
}
