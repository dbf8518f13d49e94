//! Persistence for plan documents and the completion-date log.
//!
//! The plan is stored as a whole JSON document keyed by row id and owner:
//! reads fetch the most recent document for a user, writes replace the
//! document wholesale. The store never edits inside a document, which is
//! what lets the move engine and the lifecycle hand it a fully-formed plan
//! and rely on a single atomic replace.

use std::path::Path;

use jiff::civil::Date;
use rusqlite::Connection;

use crate::error::{Result, StorageResultExt};

pub mod plan_queries;
pub mod schema;
pub mod streak_queries;

/// How a plan write interacts with the completion-date log.
///
/// Folding the streak change into the same transaction as the document
/// replace keeps a completion and its credit from interleaving with another
/// write into an inconsistent stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakUpdate {
    /// Record the day as credited (idempotent)
    Credit(Date),
    /// Remove the day's credit
    Revoke(Date),
}

/// Database connection and operations handler.
pub struct Store {
    connection: Connection,
}

impl Store {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).db_context("Failed to open database connection")?;

        let store = Self { connection };
        store.initialize_schema()?;
        Ok(store)
    }
}
