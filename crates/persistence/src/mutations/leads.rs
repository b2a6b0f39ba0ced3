// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead mutations.
//!
//! A status transition is committed as one transaction: a conditional
//! update of the lead row followed by the history insert. The update only
//! matches when the stored status and revision still equal what the
//! transition was computed against, so at most one of several concurrent
//! transitions from the same snapshot can commit.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use fieldops::TransitionResult;
use fieldops_domain::{DateSpan, HistoryEntry, Lead, LeadStatus, format_iso_date, format_timestamp};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewHistoryRow, NewLead};
use crate::diesel_schema::{lead_history, leads};
use crate::error::PersistenceError;

/// Inserts a new lead in its initial state.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `lead` - The unsaved lead
/// * `created_at` - When the lead was created
///
/// # Returns
///
/// The assigned lead ID.
///
/// # Errors
///
/// Returns `PersistenceError::InvalidNewLead` if the lead was already
/// stored or has left `BID`, or an error if the insert fails.
pub fn insert_lead(
    conn: &mut SqliteConnection,
    lead: &Lead,
    created_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    ensure_initial_state(lead)?;

    let record = NewLead {
        customer_name: lead.customer_name().to_string(),
        service_description: lead.service_description().map(ToString::to_string),
        status: lead.status().as_str().to_string(),
        task_start_date: format_iso_date(lead.task_window().start()),
        task_end_date: format_iso_date(lead.task_window().last_day()),
        revision: 0,
        created_at: stored_timestamp(created_at)?,
    };

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(leads::table)
            .values(&record)
            .execute(conn)?;
        let lead_id: i64 = get_last_insert_rowid(conn)?;
        info!(lead_id, customer = %record.customer_name, "Inserted lead");
        Ok(lead_id)
    })
}

/// Commits a status transition if the stored lead still matches its token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `result` - The transition to commit
///
/// # Returns
///
/// The ID of the inserted history row.
///
/// # Errors
///
/// Returns an error if:
/// - The lead does not exist (`LeadNotFound`)
/// - The lead's status or revision changed since the transition was
///   proposed (`StaleState`)
/// - The database operation fails
///
/// On any error nothing is written.
pub fn commit_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    let lead_id: i64 = result.token.lead_id;
    let expected_revision: usize = result.token.expected_revision;
    let stale = || PersistenceError::StaleState {
        lead_id,
        expected_revision,
    };

    let expected: i64 = revision_value(expected_revision)?;
    let next: i64 = expected + 1;

    let follow_up: Option<DateSpan> = result.new_lead.follow_up();
    let follow_up_date: Option<String> = follow_up.map(|w| format_iso_date(w.start()));
    let follow_up_end_date: Option<String> = follow_up.and_then(|w| w.end()).map(format_iso_date);
    let history_row: NewHistoryRow = history_row(lead_id, expected, &result.entry)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(
            leads::table
                .filter(leads::lead_id.eq(lead_id))
                .filter(leads::revision.eq(expected))
                .filter(leads::status.eq(result.token.expected_status.as_str())),
        )
        .set((
            leads::status.eq(result.new_lead.status().as_str()),
            leads::follow_up_date.eq(follow_up_date.as_deref()),
            leads::follow_up_end_date.eq(follow_up_end_date.as_deref()),
            leads::cancellation_reason.eq(result.new_lead.cancellation_reason()),
            leads::revision.eq(next),
        ))
        .execute(conn)?;

        if updated == 0 {
            let exists: i64 = leads::table
                .filter(leads::lead_id.eq(lead_id))
                .count()
                .get_result(conn)?;
            if exists == 0 {
                return Err(PersistenceError::LeadNotFound(lead_id));
            }
            warn!(lead_id, expected_revision, "Rejected stale lead transition");
            return Err(stale());
        }

        match diesel::insert_into(lead_history::table)
            .values(&history_row)
            .execute(conn)
        {
            Ok(_) => {}
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                warn!(
                    lead_id,
                    sequence = expected,
                    "History sequence already taken"
                );
                return Err(stale());
            }
            Err(e) => return Err(e.into()),
        }
        let history_id: i64 = get_last_insert_rowid(conn)?;

        debug!(
            lead_id,
            history_id,
            sequence = expected,
            "Appended history entry"
        );
        info!(
            lead_id,
            from = %result.entry.from_status,
            to = %result.entry.to_status,
            revision = next,
            "Committed lead transition"
        );
        Ok(history_id)
    })
}

/// Only what a fresh lead row holds may be inserted.
fn ensure_initial_state(lead: &Lead) -> Result<(), PersistenceError> {
    if let Some(lead_id) = lead.lead_id() {
        return Err(PersistenceError::InvalidNewLead(format!(
            "lead {lead_id} is already stored"
        )));
    }
    if lead.status() != LeadStatus::Bid {
        return Err(PersistenceError::InvalidNewLead(format!(
            "status is {}, expected BID",
            lead.status()
        )));
    }
    if !lead.history().is_empty()
        || lead.follow_up().is_some()
        || lead.cancellation_reason().is_some()
    {
        return Err(PersistenceError::InvalidNewLead(String::from(
            "lead already carries transition state",
        )));
    }
    Ok(())
}

fn history_row(
    lead_id: i64,
    sequence: i64,
    entry: &HistoryEntry,
) -> Result<NewHistoryRow, PersistenceError> {
    Ok(NewHistoryRow {
        lead_id,
        sequence,
        from_status: entry.from_status.as_str().to_string(),
        to_status: entry.to_status.as_str().to_string(),
        prev_date: format_iso_date(entry.prev_date),
        prev_end_date: entry.prev_end_date.map(format_iso_date),
        new_date: entry.new_date.map(format_iso_date),
        new_end_date: entry.new_end_date.map(format_iso_date),
        reason: entry.reason.clone(),
        recorded_at: stored_timestamp(entry.timestamp)?,
    })
}

fn revision_value(revision: usize) -> Result<i64, PersistenceError> {
    i64::try_from(revision)
        .map_err(|_| PersistenceError::SerializationError(format!("revision {revision} overflows")))
}

fn stored_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    format_timestamp(value).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}
