// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates in responses are `YYYY-MM-DD` strings. History entries keep
//! their camelCase wire form.

use fieldops_domain::HistoryEntry;
use time::Date;

/// API request to create a new lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLeadRequest {
    /// The customer the lead belongs to.
    pub customer_name: String,
    /// Optional description of the planned work.
    pub service_description: Option<String>,
    /// The originally planned first service day.
    pub task_start_date: Date,
    /// The originally planned last service day.
    pub task_end_date: Date,
}

/// API request to move a lead to a new status.
///
/// `new_status` is kept as the raw operator value so unknown statuses are
/// reported through the status machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLeadStatusRequest {
    /// The requested status (`BID`, `Confirm`, `Reschedule`, `Cancelled`).
    pub new_status: String,
    /// The proposed start date.
    pub proposed_start_date: Option<Date>,
    /// The proposed end date.
    pub proposed_end_date: Option<Date>,
    /// Free-text reason, required for cancellation.
    pub reason: Option<String>,
}

/// Snapshot of a lead as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeadInfo {
    /// The canonical lead identifier.
    pub lead_id: i64,
    /// The customer name.
    pub customer_name: String,
    /// The service description, if any.
    pub service_description: Option<String>,
    /// The current status.
    pub status: String,
    /// The originally planned first service day.
    pub task_start_date: String,
    /// The originally planned last service day.
    pub task_end_date: Option<String>,
    /// The follow-up start date, if scheduled.
    pub follow_up_date: Option<String>,
    /// The follow-up end date, if scheduled.
    pub follow_up_end_date: Option<String>,
    /// The reason recorded when the lead was cancelled.
    pub cancellation_reason: Option<String>,
    /// The number of committed transitions.
    pub revision: usize,
}

/// API response for a successful lead creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateLeadResponse {
    /// The created lead.
    pub lead: LeadInfo,
    /// A success message.
    pub message: String,
}

/// API response listing leads.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListLeadsResponse {
    /// The matching leads, ordered by identifier.
    pub leads: Vec<LeadInfo>,
}

/// API response for a committed status change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChangeLeadStatusResponse {
    /// The lead after the transition.
    pub lead: LeadInfo,
    /// The history entry that was appended.
    pub entry: HistoryEntry,
    /// A success message.
    pub message: String,
}

/// API response describing a lead's history.
///
/// Carries both the raw append-only history and its reconciled form so an
/// operator can see which entries were folded away.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeadHistoryResponse {
    /// The lead identifier.
    pub lead_id: i64,
    /// The current status.
    pub status: String,
    /// Every recorded entry, in insertion order.
    pub raw: Vec<HistoryEntry>,
    /// The entries that survive reconciliation.
    pub reconciled: Vec<HistoryEntry>,
    /// Whether the reconciled history is a single confirmation on the
    /// original start date.
    pub is_simple_confirm: bool,
    /// The start of the window first planned for the lead.
    pub original_date: String,
    /// The end of the window first planned for the lead.
    pub original_end_date: Option<String>,
    /// The start of the window currently in effect.
    pub effective_date: String,
    /// The end of the window currently in effect.
    pub effective_end_date: Option<String>,
}

/// One rendered row of a lead's date column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DisplayLineInfo {
    /// The label, e.g. `RESCHEDULED TO`.
    pub label: Option<String>,
    /// The first day shown on the line.
    pub start_date: String,
    /// The last day shown on the line, if different from the first.
    pub end_date: Option<String>,
    /// Whether the dates are struck through.
    pub struck: bool,
    /// Color hint (`plain`, `green`, `amber`, `red`).
    pub tone: String,
    /// Whether this line is the lead's current value.
    pub current: bool,
    /// The line rendered as text.
    pub text: String,
}

/// API response with a lead's projected date column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeadViewResponse {
    /// The lead identifier.
    pub lead_id: i64,
    /// The current status.
    pub status: String,
    /// The display lines, top to bottom.
    pub lines: Vec<DisplayLineInfo>,
}

/// What the ticket creation flow needs to prefill a service ticket.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TicketPrefillResponse {
    /// The lead identifier.
    pub lead_id: i64,
    /// The customer name.
    pub customer_name: String,
    /// The service description, if any.
    pub service_description: Option<String>,
    /// The current status.
    pub status: String,
    /// The start of the window currently in effect.
    pub effective_date: String,
    /// The end of the window currently in effect.
    pub effective_end_date: Option<String>,
}
