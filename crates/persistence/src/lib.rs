// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead store.
//!
//! Persists leads and their append-only status history in `SQLite` via
//! Diesel. A lead is always loaded together with its full history, and a
//! status transition is committed atomically with an optimistic
//! concurrency check against the snapshot it was computed from.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` opens a fresh shared in-memory database
//! per call, so tests never see each other's data.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use fieldops::TransitionResult;
use fieldops_domain::{Lead, LeadStatus};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for leads and their history.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_leads_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Leads
    // ========================================================================

    /// Stores a newly created lead.
    ///
    /// # Arguments
    ///
    /// * `lead` - An unsaved lead in its initial state
    ///
    /// # Returns
    ///
    /// The lead with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_lead(&mut self, lead: &Lead) -> Result<Lead, PersistenceError> {
        let lead_id: i64 = mutations::insert_lead(&mut self.conn, lead, OffsetDateTime::now_utc())?;
        Ok(lead.clone().with_lead_id(lead_id))
    }

    /// Loads a lead snapshot with its full history.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::LeadNotFound` if the lead does not exist.
    pub fn get_lead(&mut self, lead_id: i64) -> Result<Lead, PersistenceError> {
        queries::get_lead(&mut self.conn, lead_id)
    }

    /// Lists leads in id order, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_leads(
        &mut self,
        status: Option<LeadStatus>,
    ) -> Result<Vec<Lead>, PersistenceError> {
        queries::list_leads(&mut self.conn, status)
    }

    /// Commits a status transition.
    ///
    /// The new status, follow-up window and history entry are written
    /// atomically, and only if the stored lead still has the status and
    /// revision recorded in the transition's commit token.
    ///
    /// # Returns
    ///
    /// The ID of the new history row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StaleState` if the lead changed since the
    /// transition was proposed, `PersistenceError::LeadNotFound` if it does
    /// not exist, or a database error.
    pub fn commit_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        mutations::commit_transition(&mut self.conn, result)
    }
}
