//! Plan document CRUD.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use super::StreakUpdate;
use crate::error::{CoreError, Result, StorageResultExt};
use crate::models::{HistoryEntry, Plan, PlanRecord};

const INSERT_PLAN_SQL: &str =
    "INSERT INTO plans (user_id, document, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_LATEST_PLAN_SQL: &str = "SELECT id, user_id, document, created_at, updated_at \
     FROM plans WHERE user_id = ?1 ORDER BY updated_at DESC, id DESC LIMIT 1";
const UPDATE_PLAN_DOCUMENT_SQL: &str =
    "UPDATE plans SET document = ?1, updated_at = ?2 WHERE id = ?3";
const SELECT_PLAN_BY_ID_SQL: &str =
    "SELECT id, user_id, document, created_at, updated_at FROM plans WHERE id = ?1";
const INSERT_HISTORY_SQL: &str = "INSERT INTO history (plan_id, user_id, document, archived_at) \
     SELECT id, user_id, document, ?1 FROM plans WHERE id = ?2";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";
const SELECT_HISTORY_SQL: &str =
    "SELECT plan_id, document, archived_at FROM history WHERE user_id = ?1 ORDER BY archived_at DESC";

impl super::Store {
    /// Helper to construct a PlanRecord from a database row.
    fn build_record_from_row(row: &rusqlite::Row) -> rusqlite::Result<PlanRecord> {
        let document: String = row.get(2)?;
        let plan: Plan = serde_json::from_str(&document).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
        })?;

        Ok(PlanRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            plan,
            created_at: parse_timestamp(row, 3)?,
            updated_at: parse_timestamp(row, 4)?,
        })
    }

    /// Stores a newly adopted plan document for a user.
    pub fn create_plan(&mut self, user_id: &str, plan: &Plan, now: Timestamp) -> Result<PlanRecord> {
        let document = serde_json::to_string(plan)?;
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_PLAN_SQL,
                params![user_id, &document, &now_str, &now_str],
            )
            .db_context("Failed to insert plan")?;

        Ok(PlanRecord {
            id: self.connection.last_insert_rowid(),
            user_id: user_id.to_string(),
            plan: plan.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Most recent plan document for a user, if any.
    pub fn latest_plan(&self, user_id: &str) -> Result<Option<PlanRecord>> {
        self.connection
            .query_row(SELECT_LATEST_PLAN_SQL, params![user_id], |row| {
                Self::build_record_from_row(row)
            })
            .optional()
            .db_context("Failed to load latest plan")
    }

    /// Fetches a plan record by row id.
    pub fn plan_by_id(&self, id: i64) -> Result<Option<PlanRecord>> {
        self.connection
            .query_row(SELECT_PLAN_BY_ID_SQL, params![id], |row| {
                Self::build_record_from_row(row)
            })
            .optional()
            .db_context("Failed to load plan")
    }

    /// Replaces a plan document wholesale, optionally folding a streak-log
    /// change into the same transaction.
    pub fn save_plan(
        &mut self,
        id: i64,
        plan: &Plan,
        streak: Option<(&str, StreakUpdate)>,
        now: Timestamp,
    ) -> Result<()> {
        let document = serde_json::to_string(plan)?;
        let now_str = now.to_string();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let updated = tx
            .execute(UPDATE_PLAN_DOCUMENT_SQL, params![&document, &now_str, id])
            .db_context("Failed to replace plan document")?;
        if updated == 0 {
            return Err(CoreError::PlanNotFound { id });
        }

        if let Some((user_id, update)) = streak {
            match update {
                StreakUpdate::Credit(day) => {
                    tx.execute(
                        super::streak_queries::INSERT_STREAK_DAY_SQL,
                        params![user_id, day.to_string()],
                    )
                    .db_context("Failed to record completion day")?;
                }
                StreakUpdate::Revoke(day) => {
                    tx.execute(
                        super::streak_queries::DELETE_STREAK_DAY_SQL,
                        params![user_id, day.to_string()],
                    )
                    .db_context("Failed to remove completion day")?;
                }
            }
        }

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Archives a plan to history and deletes it, in one transaction.
    pub fn archive_and_delete_plan(&mut self, id: i64, now: Timestamp) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let archived = tx
            .execute(INSERT_HISTORY_SQL, params![now.to_string(), id])
            .db_context("Failed to archive plan")?;
        if archived == 0 {
            return Err(CoreError::PlanNotFound { id });
        }

        tx.execute(DELETE_PLAN_SQL, params![id])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Archived plans for a user, newest first.
    pub fn history(&self, user_id: &str) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_HISTORY_SQL)
            .db_context("Failed to prepare history query")?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                let document: String = row.get(1)?;
                let plan: Plan = serde_json::from_str(&document).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                })?;
                Ok(HistoryEntry {
                    plan_id: row.get(0)?,
                    overview: plan.overview,
                    archived_at: parse_timestamp(row, 2)?,
                })
            })
            .db_context("Failed to query history")?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.db_context("Failed to read history row")?);
        }
        Ok(entries)
    }
}

fn parse_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
