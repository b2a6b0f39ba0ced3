// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead queries.
//!
//! A lead is loaded together with its full history in insertion order.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fieldops_domain::{DateSpan, HistoryEntry, Lead, LeadStatus, parse_iso_date, parse_timestamp};
use time::Date;
use tracing::debug;

use crate::data_models::{HistoryRow, LeadRow};
use crate::diesel_schema::{lead_history, leads};
use crate::error::PersistenceError;

/// Retrieves a lead and its full history.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `lead_id` - The lead to load
///
/// # Errors
///
/// Returns `PersistenceError::LeadNotFound` if no such lead exists, or an
/// error if a stored row cannot be reconstructed.
pub fn get_lead(conn: &mut SqliteConnection, lead_id: i64) -> Result<Lead, PersistenceError> {
    let row: LeadRow = leads::table
        .filter(leads::lead_id.eq(lead_id))
        .select(LeadRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_lead: {e}")))?
        .ok_or(PersistenceError::LeadNotFound(lead_id))?;

    let history: Vec<HistoryRow> = lead_history::table
        .filter(lead_history::lead_id.eq(lead_id))
        .order(lead_history::sequence.asc())
        .select(HistoryRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_lead history: {e}")))?;

    debug!(lead_id, entries = history.len(), "Loaded lead");

    lead_from_rows(row, history)
}

/// Lists leads in id order, optionally restricted to one status.
///
/// Histories are loaded through a join on the same filter, inside the same
/// read transaction as the lead rows, so no per-lead parameters are bound.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be
/// reconstructed.
pub fn list_leads(
    conn: &mut SqliteConnection,
    status: Option<LeadStatus>,
) -> Result<Vec<Lead>, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut lead_query = leads::table.into_boxed();
        let mut history_query = lead_history::table
            .inner_join(leads::table)
            .select(HistoryRow::as_select())
            .into_boxed();
        if let Some(status) = status {
            lead_query = lead_query.filter(leads::status.eq(status.as_str()));
            history_query = history_query.filter(leads::status.eq(status.as_str()));
        }

        let rows: Vec<LeadRow> = lead_query
            .order(leads::lead_id.asc())
            .select(LeadRow::as_select())
            .load(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("list_leads: {e}")))?;

        let history: Vec<HistoryRow> = history_query
            .order((lead_history::lead_id.asc(), lead_history::sequence.asc()))
            .load(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("list_leads history: {e}")))?;

        debug!(leads = rows.len(), entries = history.len(), "Listed leads");

        // Both result sets are ordered by lead id.
        let mut history = history.into_iter().peekable();
        let mut leads_out: Vec<Lead> = Vec::with_capacity(rows.len());
        for row in rows {
            let mut own: Vec<HistoryRow> = Vec::new();
            while let Some(entry) = history.next_if(|h| h.lead_id <= row.lead_id) {
                if entry.lead_id == row.lead_id {
                    own.push(entry);
                }
            }
            leads_out.push(lead_from_rows(row, own)?);
        }

        Ok(leads_out)
    })
}

/// Rebuilds a domain lead from its stored rows.
fn lead_from_rows(row: LeadRow, history: Vec<HistoryRow>) -> Result<Lead, PersistenceError> {
    for (position, entry) in history.iter().enumerate() {
        if usize::try_from(entry.sequence).ok() != Some(position) {
            return Err(PersistenceError::ReconstructionError(format!(
                "lead {} has history sequence {} at position {position}",
                row.lead_id, entry.sequence
            )));
        }
    }

    let entries: Vec<HistoryEntry> = history
        .into_iter()
        .map(history_entry_from_row)
        .collect::<Result<_, _>>()?;

    let revision: usize = usize::try_from(row.revision).map_err(|_| {
        PersistenceError::ReconstructionError(format!(
            "lead {} has negative revision {}",
            row.lead_id, row.revision
        ))
    })?;
    if revision != entries.len() {
        return Err(PersistenceError::ReconstructionError(format!(
            "lead {} is at revision {revision} but has {} history entries",
            row.lead_id,
            entries.len()
        )));
    }

    let task_window: DateSpan = DateSpan::new(
        stored_date(&row.task_start_date)?,
        Some(stored_date(&row.task_end_date)?),
    );
    let follow_up: Option<DateSpan> = match row.follow_up_date.as_deref() {
        Some(start) => Some(DateSpan::new(
            stored_date(start)?,
            optional_stored_date(row.follow_up_end_date.as_deref())?,
        )),
        None => None,
    };

    Ok(Lead::restore(
        row.lead_id,
        row.customer_name,
        row.service_description,
        stored_status(&row.status)?,
        task_window,
        follow_up,
        entries,
        row.cancellation_reason,
    ))
}

fn history_entry_from_row(row: HistoryRow) -> Result<HistoryEntry, PersistenceError> {
    Ok(HistoryEntry {
        from_status: stored_status(&row.from_status)?,
        to_status: stored_status(&row.to_status)?,
        prev_date: stored_date(&row.prev_date)?,
        prev_end_date: optional_stored_date(row.prev_end_date.as_deref())?,
        new_date: optional_stored_date(row.new_date.as_deref())?,
        new_end_date: optional_stored_date(row.new_end_date.as_deref())?,
        reason: row.reason,
        timestamp: parse_timestamp(&row.recorded_at)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
    })
}

fn stored_status(value: &str) -> Result<LeadStatus, PersistenceError> {
    value
        .parse()
        .map_err(|e: fieldops_domain::DomainError| {
            PersistenceError::ReconstructionError(e.to_string())
        })
}

fn stored_date(value: &str) -> Result<Date, PersistenceError> {
    parse_iso_date(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

fn optional_stored_date(value: Option<&str>) -> Result<Option<Date>, PersistenceError> {
    value.map(stored_date).transpose()
}
