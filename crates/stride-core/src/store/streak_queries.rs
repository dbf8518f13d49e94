//! Completion-date log queries.
//!
//! The log is an append-only set of distinct calendar days. `INSERT OR
//! IGNORE` makes crediting idempotent: completing two tasks on the same day
//! grows the set by at most one entry.

use std::collections::BTreeSet;

use jiff::civil::Date;
use rusqlite::{params, types::Type};

use crate::error::{Result, StorageResultExt};

pub(super) const INSERT_STREAK_DAY_SQL: &str =
    "INSERT OR IGNORE INTO streak_days (user_id, day) VALUES (?1, ?2)";
pub(super) const DELETE_STREAK_DAY_SQL: &str =
    "DELETE FROM streak_days WHERE user_id = ?1 AND day = ?2";
const SELECT_STREAK_DAYS_SQL: &str =
    "SELECT day FROM streak_days WHERE user_id = ?1 ORDER BY day";

impl super::Store {
    /// Records a completion day for a user (idempotent).
    pub fn record_completion_day(&mut self, user_id: &str, day: Date) -> Result<()> {
        self.connection
            .execute(INSERT_STREAK_DAY_SQL, params![user_id, day.to_string()])
            .db_context("Failed to record completion day")?;
        Ok(())
    }

    /// Removes a completion day for a user.
    pub fn remove_completion_day(&mut self, user_id: &str, day: Date) -> Result<()> {
        self.connection
            .execute(DELETE_STREAK_DAY_SQL, params![user_id, day.to_string()])
            .db_context("Failed to remove completion day")?;
        Ok(())
    }

    /// All recorded completion days for a user, ascending.
    pub fn completion_days(&self, user_id: &str) -> Result<BTreeSet<Date>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STREAK_DAYS_SQL)
            .db_context("Failed to prepare streak query")?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                row.get::<_, String>(0)?.parse::<Date>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
                })
            })
            .db_context("Failed to query completion days")?;

        let mut days = BTreeSet::new();
        for row in rows {
            days.insert(row.db_context("Failed to read completion day")?);
        }
        Ok(days)
    }
}
