// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fieldops_domain::{DateSpan, DomainError, HistoryEntry, Lead, StatusChange};
use time::{Duration, OffsetDateTime};
use tracing::debug;

/// Decides whether `change` is legal for `lead` and builds the entry to append.
///
/// This is a pure decision function: nothing is mutated and nothing is
/// committed. The caller commits the returned entry together with the
/// status and effective-window update.
///
/// # Arguments
///
/// * `lead` - The lead snapshot the change was proposed against
/// * `change` - The proposed change
/// * `today` - The current business day
/// * `now` - The current instant
///
/// # Errors
///
/// Returns the first validation rule the change violates.
pub fn propose_transition(
    lead: &Lead,
    change: &StatusChange,
    today: time::Date,
    now: OffsetDateTime,
) -> Result<HistoryEntry, DomainError> {
    let effective: DateSpan = lead.effective_window();

    if let Err(err) = lead
        .status()
        .validate_transition(change, &effective, today)
    {
        debug!(
            lead_id = ?lead.lead_id(),
            from = %lead.status(),
            to = %change.new_status,
            rule = err.rule(),
            "Rejected lead transition"
        );
        return Err(err);
    }

    // Only scheduling statuses put a new window into effect.
    let (new_date, new_end_date) = if change.new_status.sets_schedule() {
        (change.start_date, change.end_date)
    } else {
        (None, None)
    };

    Ok(HistoryEntry {
        from_status: lead.status(),
        to_status: change.new_status,
        prev_date: effective.start(),
        prev_end_date: effective.end(),
        new_date,
        new_end_date,
        reason: change.reason().map(str::to_string),
        timestamp: next_timestamp(lead, now)?,
    })
}

/// Returns a timestamp strictly after the lead's last history entry.
fn next_timestamp(lead: &Lead, now: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    match lead.history().last() {
        Some(last) if now <= last.timestamp => {
            let next = last.timestamp.checked_add(Duration::milliseconds(1));
            next.ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("advancing history timestamp past {}", last.timestamp),
            })
        }
        _ => Ok(now),
    }
}
