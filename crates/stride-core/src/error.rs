//! Error types for the stride core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::ExecutionState;

/// Comprehensive error type for all core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Another task already holds the execution timer
    #[error("Another task is already in progress: '{active_title}'")]
    TimerConflict { active_title: String },
    /// A task lifecycle transition that the state machine does not allow
    #[error("Invalid transition from '{from}' to '{to}'")]
    InvalidTransition {
        from: ExecutionState,
        to: ExecutionState,
    },
    /// A move touching a week that is not yet unlocked
    #[error("Week {week_number} is locked")]
    LockedWeek { week_number: u32 },
    /// A move request that fails validation for a non-lock reason
    #[error("Invalid move: {reason}")]
    InvalidMove { reason: String },
    /// An incoming plan document that violates the model invariants
    #[error("Invalid plan document: {reason}")]
    InvalidDocument { reason: String },
    /// No plan is loaded into the session
    #[error("No plan is loaded")]
    NoPlanLoaded,
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: i64 },
    /// Task not found at the given position
    #[error("No task at week {week_index}, position {task_index}")]
    TaskNotFound {
        week_index: usize,
        task_index: usize,
    },
    /// Database connection or query errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CoreError {
    /// Creates a storage error with additional context.
    pub fn storage(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    /// Creates an input validation error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Extension trait for database-related Results to attach a context message.
pub trait StorageResultExt<T> {
    /// Map storage errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> StorageResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CoreError::storage(message, e))
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
