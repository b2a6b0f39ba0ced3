// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::Clock;
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{CommitToken, TransitionResult};
use crate::transition::propose_transition;
use fieldops_domain::{HistoryEntry, Lead, LeadStatus, StatusChange, validate_lead_fields};
use time::Date;

/// Applies a `CreateLead` command, producing a new unsaved lead.
///
/// # Arguments
///
/// * `command` - The create command
///
/// # Returns
///
/// * `Ok(Lead)` in `BID` status with an empty history
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The customer name is empty
/// - The task end date is before the task start date
/// - The command is not `CreateLead`
pub fn apply_create(command: Command) -> Result<Lead, CoreError> {
    match command {
        Command::CreateLead {
            customer_name,
            service_description,
            task_start_date,
            task_end_date,
        } => {
            validate_lead_fields(&customer_name, task_start_date, task_end_date)?;

            let service_description: Option<String> = service_description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());

            Ok(Lead::new(
                customer_name.trim().to_string(),
                service_description,
                task_start_date,
                task_end_date,
            ))
        }
        other @ Command::ChangeStatus { .. } => Err(CoreError::UnsupportedCommand(other.name())),
    }
}

/// Applies a `ChangeStatus` command to a lead snapshot.
///
/// The requested status is parsed first, so an unknown status is reported
/// as `InvalidStatus` before any other rule is considered.
///
/// # Arguments
///
/// * `lead` - The current lead snapshot (immutable)
/// * `command` - The command to apply
/// * `clock` - Source of the current instant and business day
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new lead, the appended entry and
///   the commit precondition
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates a lead status rule
/// - The lead has not been persisted
/// - The command is not `ChangeStatus`
pub fn apply<C: Clock + ?Sized>(
    lead: &Lead,
    command: Command,
    clock: &C,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::ChangeStatus {
            new_status,
            proposed_start_date,
            proposed_end_date,
            reason,
        } => {
            let change: StatusChange =
                parse_change(&new_status, proposed_start_date, proposed_end_date, reason)?;

            let lead_id: i64 = lead.lead_id().ok_or(CoreError::LeadNotPersisted)?;
            let today: Date = clock.today()?;

            let entry: HistoryEntry = propose_transition(lead, &change, today, clock.now())?;
            let new_lead: Lead = lead.append_transition(entry.clone());

            Ok(TransitionResult {
                new_lead,
                entry,
                token: CommitToken {
                    lead_id,
                    expected_status: lead.status(),
                    expected_revision: lead.revision(),
                },
            })
        }
        other @ Command::CreateLead { .. } => Err(CoreError::UnsupportedCommand(other.name())),
    }
}

fn parse_change(
    new_status: &str,
    start_date: Option<Date>,
    end_date: Option<Date>,
    reason: Option<String>,
) -> Result<StatusChange, CoreError> {
    let new_status: LeadStatus = new_status.parse()?;
    Ok(StatusChange {
        new_status,
        start_date,
        end_date,
        reason,
    })
}
