//! Builder for creating and configuring Session instances.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task;

use super::Session;
use crate::aggregate::StreakPolicy;
use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, Result};
use crate::schedule::SignalThresholds;
use crate::store::Store;
use crate::timer::TimerController;

/// Builder for creating and configuring Session instances.
#[derive(Clone)]
pub struct SessionBuilder {
    database_path: Option<PathBuf>,
    user_id: String,
    clock: Option<Arc<dyn Clock>>,
    thresholds: SignalThresholds,
    streak_policy: StreakPolicy,
}

impl SessionBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            user_id: "default".to_string(),
            clock: None,
            thresholds: SignalThresholds::default(),
            streak_policy: StreakPolicy::default(),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/stride/stride.db` or `~/.local/share/stride/stride.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the user the session operates for.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Injects a clock (tests pin this to a fixed instant).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Overrides the signal-state classification thresholds.
    pub fn with_thresholds(mut self, thresholds: SignalThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets how a reopen interacts with an already-granted streak credit.
    pub fn with_streak_policy(mut self, policy: StreakPolicy) -> Self {
        self.streak_policy = policy;
        self
    }

    /// Builds the configured session instance.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::FileSystem` if the database path is invalid and
    /// `CoreError::Storage` if schema initialization fails.
    pub async fn build(self) -> Result<Session> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _store = Store::new(&db_path_clone)?;
            Ok::<(), CoreError>(())
        })
        .await
        .map_err(|e| CoreError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Session {
            db_path,
            user_id: self.user_id,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            thresholds: self.thresholds,
            streak_policy: self.streak_policy,
            plan_id: None,
            plan: None,
            timer: TimerController::new(),
            celebrated_weeks: HashSet::new(),
        })
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("stride")
            .place_data_file("stride.db")
            .map_err(|e| CoreError::XdgDirectory(e.to_string()))
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
