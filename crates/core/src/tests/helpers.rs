// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, FixedClock};
use fieldops_domain::{DateSpan, HistoryEntry, Lead, LeadStatus};
use time::macros::{date, datetime};
use time::{Date, Duration, OffsetDateTime};

pub const TODAY: Date = date!(2026 - 02 - 01);

pub fn create_test_clock() -> FixedClock {
    FixedClock::new(datetime!(2026-02-01 09:00 UTC), TODAY)
}

/// A stored `BID` lead for 2026-03-01.
pub fn create_test_lead() -> Lead {
    Lead::new(
        String::from("Harbor Cold Storage"),
        Some(String::from("Walk-in freezer compressor replacement")),
        date!(2026 - 03 - 01),
        date!(2026 - 03 - 01),
    )
    .with_lead_id(1)
}

pub fn change_status(new_status: &str, start: Option<Date>, end: Option<Date>) -> Command {
    Command::ChangeStatus {
        new_status: new_status.to_string(),
        proposed_start_date: start,
        proposed_end_date: end,
        reason: None,
    }
}

pub fn cancel(reason: &str) -> Command {
    Command::ChangeStatus {
        new_status: String::from("Cancelled"),
        proposed_start_date: None,
        proposed_end_date: None,
        reason: Some(reason.to_string()),
    }
}

/// Builds a raw history entry `minutes` after a fixed base instant.
pub fn history_entry(
    from_status: LeadStatus,
    to_status: LeadStatus,
    prev: DateSpan,
    new: Option<DateSpan>,
    minutes: i64,
) -> HistoryEntry {
    let base: OffsetDateTime = datetime!(2026-01-15 12:00 UTC);
    HistoryEntry {
        from_status,
        to_status,
        prev_date: prev.start(),
        prev_end_date: prev.end(),
        new_date: new.map(|w| w.start()),
        new_end_date: new.and_then(|w| w.end()),
        reason: None,
        timestamp: base + Duration::minutes(minutes),
    }
}
