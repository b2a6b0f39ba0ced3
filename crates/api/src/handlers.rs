// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers are synchronous and never touch storage. State-changing
//! handlers return what must be committed; the caller owns the commit.

use fieldops::{
    Clock, Command, DisplayLine, ReconciledHistory, TransitionResult, apply, apply_create,
    project,
};
use fieldops_domain::{DateSpan, Lead, LeadStatus, format_iso_date, parse_iso_date};
use time::Date;
use tracing::debug;

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    ChangeLeadStatusRequest, CreateLeadRequest, DisplayLineInfo, LeadHistoryResponse, LeadInfo,
    LeadViewResponse, ListLeadsResponse, TicketPrefillResponse,
};

/// Validates a create request and builds an unsaved lead.
///
/// # Arguments
///
/// * `request` - The API request to create a lead
///
/// # Returns
///
/// * `Ok(Lead)` in `BID` status with an empty history, ready to be stored
/// * `Err(ApiError)` if the request is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The customer name is empty
/// - The task end date is before the task start date
pub fn create_lead(request: &CreateLeadRequest) -> Result<Lead, ApiError> {
    let command: Command = Command::CreateLead {
        customer_name: request.customer_name.clone(),
        service_description: request.service_description.clone(),
        task_start_date: request.task_start_date,
        task_end_date: request.task_end_date,
    };

    apply_create(command).map_err(translate_core_error)
}

/// Proposes a status change against a lead snapshot.
///
/// The returned result carries the commit token the lead store must check.
///
/// # Arguments
///
/// * `lead` - The current lead snapshot
/// * `request` - The requested status change
/// * `clock` - Source of the current instant and business day
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` when the change breaks a status
/// rule, or `ApiError::Internal` if the lead was never stored.
pub fn change_lead_status<C: Clock + ?Sized>(
    lead: &Lead,
    request: ChangeLeadStatusRequest,
    clock: &C,
) -> Result<TransitionResult, ApiError> {
    let command: Command = Command::ChangeStatus {
        new_status: request.new_status,
        proposed_start_date: request.proposed_start_date,
        proposed_end_date: request.proposed_end_date,
        reason: request.reason,
    };

    let result: TransitionResult = apply(lead, command, clock).map_err(translate_core_error)?;
    debug!(
        lead_id = result.token.lead_id,
        from = %result.entry.from_status,
        to = %result.entry.to_status,
        "Proposed lead transition"
    );
    Ok(result)
}

/// Converts a stored lead into its API snapshot.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the lead has no identifier.
pub fn lead_info(lead: &Lead) -> Result<LeadInfo, ApiError> {
    let task_window: DateSpan = lead.task_window();
    let follow_up: Option<DateSpan> = lead.follow_up();

    Ok(LeadInfo {
        lead_id: stored_id(lead)?,
        customer_name: lead.customer_name().to_string(),
        service_description: lead.service_description().map(str::to_string),
        status: lead.status().to_string(),
        task_start_date: format_iso_date(task_window.start()),
        task_end_date: task_window.end().map(format_iso_date),
        follow_up_date: follow_up.map(|w| format_iso_date(w.start())),
        follow_up_end_date: follow_up.and_then(|w| w.end()).map(format_iso_date),
        cancellation_reason: lead.cancellation_reason().map(str::to_string),
        revision: lead.revision(),
    })
}

/// Lists leads in the order given.
///
/// # Errors
///
/// Returns `ApiError::Internal` if any lead has no identifier.
pub fn list_leads(leads: &[Lead]) -> Result<ListLeadsResponse, ApiError> {
    let leads: Vec<LeadInfo> = leads.iter().map(lead_info).collect::<Result<_, _>>()?;
    Ok(ListLeadsResponse { leads })
}

/// Returns a lead's raw and reconciled history with the derived dates.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the lead has no identifier.
pub fn get_lead_history(lead: &Lead) -> Result<LeadHistoryResponse, ApiError> {
    let reconciled: ReconciledHistory = ReconciledHistory::from_lead(lead);
    let original: DateSpan = reconciled.original();
    let effective: DateSpan = reconciled.effective();

    Ok(LeadHistoryResponse {
        lead_id: stored_id(lead)?,
        status: lead.status().to_string(),
        raw: lead.history().to_vec(),
        reconciled: reconciled.entries().to_vec(),
        is_simple_confirm: reconciled.is_simple_confirm(),
        original_date: format_iso_date(original.start()),
        original_end_date: original.end().map(format_iso_date),
        effective_date: format_iso_date(effective.start()),
        effective_end_date: effective.end().map(format_iso_date),
    })
}

/// Projects a lead's date column for display.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the lead has no identifier.
pub fn get_lead_view(lead: &Lead) -> Result<LeadViewResponse, ApiError> {
    let reconciled: ReconciledHistory = ReconciledHistory::from_lead(lead);
    let lines: Vec<DisplayLineInfo> = project(lead.status(), &reconciled)
        .iter()
        .map(display_line_info)
        .collect();

    Ok(LeadViewResponse {
        lead_id: stored_id(lead)?,
        status: lead.status().to_string(),
        lines,
    })
}

/// Returns what ticket creation needs to prefill a service ticket.
///
/// The dates are the window currently in effect, so a rescheduled lead
/// prefills its latest dates rather than the original plan.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the lead has no identifier.
pub fn get_ticket_prefill(lead: &Lead) -> Result<TicketPrefillResponse, ApiError> {
    let effective: DateSpan = lead.effective_window();

    Ok(TicketPrefillResponse {
        lead_id: stored_id(lead)?,
        customer_name: lead.customer_name().to_string(),
        service_description: lead.service_description().map(str::to_string),
        status: lead.status().to_string(),
        effective_date: format_iso_date(effective.start()),
        effective_end_date: effective.end().map(format_iso_date),
    })
}

/// Parses the optional `status` filter of a list request.
///
/// An absent or blank filter lists every lead.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the value is not a known status.
pub fn parse_status_filter(value: Option<&str>) -> Result<Option<LeadStatus>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<LeadStatus>()
            .map(Some)
            .map_err(|e| ApiError::InvalidInput {
                field: String::from("status"),
                message: e.to_string(),
            }),
    }
}

/// Parses a `YYYY-MM-DD` request field.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming `field` if the value is not a
/// calendar date.
pub fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_iso_date(value).map_err(|e| match translate_domain_error(e) {
        ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        other => other,
    })
}

/// Parses an optional `YYYY-MM-DD` request field.
///
/// An absent or blank value yields `None`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming `field` if a value is present but
/// is not a calendar date.
pub fn parse_optional_date_field(
    field: &str,
    value: Option<&str>,
) -> Result<Option<Date>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date_field(field, raw).map(Some),
    }
}

fn display_line_info(line: &DisplayLine) -> DisplayLineInfo {
    DisplayLineInfo {
        label: line.label.map(|label| label.as_str().to_string()),
        start_date: format_iso_date(line.window.start()),
        end_date: line
            .window
            .end()
            .filter(|end| *end != line.window.start())
            .map(format_iso_date),
        struck: line.struck,
        tone: line.tone.as_str().to_string(),
        current: line.current,
        text: line.text(),
    }
}

fn stored_id(lead: &Lead) -> Result<i64, ApiError> {
    lead.lead_id().ok_or_else(|| ApiError::Internal {
        message: String::from("Lead has not been stored"),
    })
}
