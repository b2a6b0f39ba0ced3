// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DateSpan, HistoryEntry, Lead, LeadStatus, fold_effective_window};
use time::OffsetDateTime;
use time::macros::{date, datetime};

fn create_test_lead() -> Lead {
    Lead::new(
        String::from("Harbor Cold Storage"),
        Some(String::from("Compressor overhaul")),
        date!(2026 - 03 - 01),
        date!(2026 - 03 - 02),
    )
}

fn entry(
    from_status: LeadStatus,
    to_status: LeadStatus,
    prev: DateSpan,
    new: Option<DateSpan>,
    timestamp: OffsetDateTime,
) -> HistoryEntry {
    HistoryEntry {
        from_status,
        to_status,
        prev_date: prev.start(),
        prev_end_date: prev.end(),
        new_date: new.map(|w| w.start()),
        new_end_date: new.and_then(|w| w.end()),
        reason: None,
        timestamp,
    }
}

#[test]
fn test_new_lead_starts_in_bid_with_empty_history() {
    let lead: Lead = create_test_lead();

    assert_eq!(lead.lead_id(), None);
    assert_eq!(lead.status(), LeadStatus::Bid);
    assert!(lead.history().is_empty());
    assert_eq!(lead.revision(), 0);
    assert_eq!(lead.follow_up(), None);
    assert_eq!(
        lead.effective_window(),
        DateSpan::new(date!(2026 - 03 - 01), Some(date!(2026 - 03 - 02)))
    );
}

#[test]
fn test_append_confirm_sets_follow_up() {
    let lead: Lead = create_test_lead();
    let confirmed = DateSpan::new(date!(2026 - 03 - 04), Some(date!(2026 - 03 - 05)));

    let next: Lead = lead.append_transition(entry(
        LeadStatus::Bid,
        LeadStatus::Confirm,
        lead.effective_window(),
        Some(confirmed),
        datetime!(2026-02-01 09:00 UTC),
    ));

    assert_eq!(next.status(), LeadStatus::Confirm);
    assert_eq!(next.follow_up(), Some(confirmed));
    assert_eq!(next.effective_window(), confirmed);
    assert_eq!(next.revision(), 1);
    // The original snapshot is untouched.
    assert_eq!(lead.revision(), 0);
    assert_eq!(lead.status(), LeadStatus::Bid);
}

#[test]
fn test_append_bid_clears_follow_up() {
    let lead: Lead = create_test_lead();
    let confirmed = DateSpan::single(date!(2026 - 03 - 04));
    let scheduled: Lead = lead.append_transition(entry(
        LeadStatus::Bid,
        LeadStatus::Confirm,
        lead.effective_window(),
        Some(confirmed),
        datetime!(2026-02-01 09:00 UTC),
    ));

    let reverted: Lead = scheduled.append_transition(entry(
        LeadStatus::Confirm,
        LeadStatus::Bid,
        confirmed,
        None,
        datetime!(2026-02-02 09:00 UTC),
    ));

    assert_eq!(reverted.status(), LeadStatus::Bid);
    assert_eq!(reverted.follow_up(), None);
    assert_eq!(reverted.effective_window(), lead.task_window());
    assert_eq!(reverted.history().len(), 2);
}

#[test]
fn test_append_cancel_keeps_last_window_and_reason() {
    let lead: Lead = create_test_lead();
    let confirmed = DateSpan::single(date!(2026 - 03 - 04));
    let scheduled: Lead = lead.append_transition(entry(
        LeadStatus::Bid,
        LeadStatus::Confirm,
        lead.effective_window(),
        Some(confirmed),
        datetime!(2026-02-01 09:00 UTC),
    ));

    let mut cancel = entry(
        LeadStatus::Confirm,
        LeadStatus::Cancelled,
        confirmed,
        None,
        datetime!(2026-02-02 09:00 UTC),
    );
    cancel.reason = Some(String::from("Budget frozen"));
    let cancelled: Lead = scheduled.append_transition(cancel);

    assert_eq!(cancelled.status(), LeadStatus::Cancelled);
    assert_eq!(cancelled.effective_window(), confirmed);
    assert_eq!(cancelled.cancellation_reason(), Some("Budget frozen"));
}

#[test]
fn test_fold_effective_window_matches_lead_cache() {
    let lead: Lead = create_test_lead();
    let first = DateSpan::single(date!(2026 - 03 - 04));
    let second = DateSpan::new(date!(2026 - 03 - 10), Some(date!(2026 - 03 - 11)));

    let lead = lead.append_transition(entry(
        LeadStatus::Bid,
        LeadStatus::Confirm,
        lead.effective_window(),
        Some(first),
        datetime!(2026-02-01 09:00 UTC),
    ));
    let lead = lead.append_transition(entry(
        LeadStatus::Confirm,
        LeadStatus::Reschedule,
        first,
        Some(second),
        datetime!(2026-02-02 09:00 UTC),
    ));

    assert_eq!(
        fold_effective_window(lead.history(), lead.task_window()),
        lead.effective_window()
    );
    assert_eq!(lead.effective_window(), second);
}

#[test]
fn test_fold_effective_window_of_empty_history_is_original() {
    let original = DateSpan::new(date!(2026 - 03 - 01), Some(date!(2026 - 03 - 02)));

    let history: Vec<HistoryEntry> = Vec::new();

    assert_eq!(fold_effective_window(&history, original), original);
}

#[test]
fn test_history_entry_wire_format() {
    let mut record = entry(
        LeadStatus::Bid,
        LeadStatus::Confirm,
        DateSpan::new(date!(2026 - 03 - 01), Some(date!(2026 - 03 - 01))),
        Some(DateSpan::single(date!(2026 - 03 - 01))),
        datetime!(2026-02-01 09:30 UTC),
    );
    record.reason = Some(String::from("Customer confirmed by phone"));

    let json: serde_json::Value = serde_json::to_value(&record).unwrap();

    assert_eq!(json["fromStatus"], "BID");
    assert_eq!(json["toStatus"], "Confirm");
    assert_eq!(json["prevDate"], "2026-03-01");
    assert_eq!(json["prevEndDate"], "2026-03-01");
    assert_eq!(json["newDate"], "2026-03-01");
    assert!(json["newEndDate"].is_null());
    assert_eq!(json["reason"], "Customer confirmed by phone");
    assert_eq!(json["timestamp"], "2026-02-01T09:30:00Z");

    let parsed: HistoryEntry = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn test_history_entry_accepts_missing_optional_fields() {
    let json = r#"{
        "fromStatus": "Confirm",
        "toStatus": "Cancelled",
        "prevDate": "2026-03-04",
        "timestamp": "2026-02-03T10:00:00+00:00"
    }"#;

    let parsed: HistoryEntry = serde_json::from_str(json).unwrap();

    assert_eq!(parsed.to_status, LeadStatus::Cancelled);
    assert_eq!(parsed.prev_end_date, None);
    assert_eq!(parsed.new_date, None);
    assert_eq!(parsed.reason, None);
}
