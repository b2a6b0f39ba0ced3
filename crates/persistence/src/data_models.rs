// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types for the lead tables.
//!
//! Dates are stored as `YYYY-MM-DD` text and timestamps as RFC 3339 text.

use crate::diesel_schema::{lead_history, leads};
use diesel::prelude::*;

/// Diesel Queryable struct for lead rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = leads)]
pub struct LeadRow {
    pub lead_id: i64,
    pub customer_name: String,
    pub service_description: Option<String>,
    pub status: String,
    pub task_start_date: String,
    pub task_end_date: String,
    pub follow_up_date: Option<String>,
    pub follow_up_end_date: Option<String>,
    pub cancellation_reason: Option<String>,
    pub revision: i64,
}

/// Insertable struct for new lead rows.
#[derive(Debug, Insertable)]
#[diesel(table_name = leads)]
pub struct NewLead {
    pub customer_name: String,
    pub service_description: Option<String>,
    pub status: String,
    pub task_start_date: String,
    pub task_end_date: String,
    pub revision: i64,
    pub created_at: String,
}

/// Diesel Queryable struct for lead history rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = lead_history)]
pub struct HistoryRow {
    pub lead_id: i64,
    pub sequence: i64,
    pub from_status: String,
    pub to_status: String,
    pub prev_date: String,
    pub prev_end_date: Option<String>,
    pub new_date: Option<String>,
    pub new_end_date: Option<String>,
    pub reason: Option<String>,
    pub recorded_at: String,
}

/// Insertable struct for new lead history rows.
#[derive(Debug, Insertable)]
#[diesel(table_name = lead_history)]
pub struct NewHistoryRow {
    pub lead_id: i64,
    pub sequence: i64,
    pub from_status: String,
    pub to_status: String,
    pub prev_date: String,
    pub prev_end_date: Option<String>,
    pub new_date: Option<String>,
    pub new_end_date: Option<String>,
    pub reason: Option<String>,
    pub recorded_at: String,
}
