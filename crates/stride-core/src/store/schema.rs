//! Schema initialization.

use crate::error::{Result, StorageResultExt};

const CREATE_PLANS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS plans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    document TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const CREATE_HISTORY_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    plan_id INTEGER NOT NULL,
    user_id TEXT NOT NULL,
    document TEXT NOT NULL,
    archived_at TEXT NOT NULL
)";

const CREATE_STREAK_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS streak_days (
    user_id TEXT NOT NULL,
    day TEXT NOT NULL,
    PRIMARY KEY (user_id, day)
)";

const CREATE_PLANS_USER_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_plans_user ON plans (user_id, updated_at)";

impl super::Store {
    /// Creates tables and indexes if they do not exist yet.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute(CREATE_PLANS_TABLE_SQL, [])
            .db_context("Failed to create plans table")?;
        self.connection
            .execute(CREATE_HISTORY_TABLE_SQL, [])
            .db_context("Failed to create history table")?;
        self.connection
            .execute(CREATE_STREAK_TABLE_SQL, [])
            .db_context("Failed to create streak_days table")?;
        self.connection
            .execute(CREATE_PLANS_USER_INDEX_SQL, [])
            .db_context("Failed to create plans index")?;
        Ok(())
    }
}
