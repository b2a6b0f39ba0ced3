// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::DateSpan;
use crate::history::HistoryEntry;
use crate::lead_status::LeadStatus;
use time::Date;

/// A sales lead tracked through its scheduling lifecycle.
///
/// The lead's history is append-only: the only way to change status or the
/// effective window is `append_transition`, which records exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_field_names)]
pub struct Lead {
    /// The canonical identifier assigned by the lead store.
    /// `None` indicates the lead has not been persisted yet.
    lead_id: Option<i64>,
    customer_name: String,
    service_description: Option<String>,
    status: LeadStatus,
    task_window: DateSpan,
    follow_up: Option<DateSpan>,
    history: Vec<HistoryEntry>,
    cancellation_reason: Option<String>,
}

impl Lead {
    /// Creates a new lead in `BID` status with an empty history.
    ///
    /// # Arguments
    ///
    /// * `customer_name` - The customer the lead belongs to
    /// * `service_description` - Optional description of the planned work
    /// * `task_start_date` - The originally planned first service day
    /// * `task_end_date` - The originally planned last service day
    #[must_use]
    pub const fn new(
        customer_name: String,
        service_description: Option<String>,
        task_start_date: Date,
        task_end_date: Date,
    ) -> Self {
        Self {
            lead_id: None,
            customer_name,
            service_description,
            status: LeadStatus::Bid,
            task_window: DateSpan::new(task_start_date, Some(task_end_date)),
            follow_up: None,
            history: Vec::new(),
            cancellation_reason: None,
        }
    }

    /// Rebuilds a lead from stored parts.
    ///
    /// Used by the lead store when loading a snapshot. No validation is
    /// performed; stored rows were validated when they were committed.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn restore(
        lead_id: i64,
        customer_name: String,
        service_description: Option<String>,
        status: LeadStatus,
        task_window: DateSpan,
        follow_up: Option<DateSpan>,
        history: Vec<HistoryEntry>,
        cancellation_reason: Option<String>,
    ) -> Self {
        Self {
            lead_id: Some(lead_id),
            customer_name,
            service_description,
            status,
            task_window,
            follow_up,
            history,
            cancellation_reason,
        }
    }

    /// Returns this lead with the given canonical identifier.
    #[must_use]
    pub const fn with_lead_id(mut self, lead_id: i64) -> Self {
        self.lead_id = Some(lead_id);
        self
    }

    /// Returns the canonical identifier, if persisted.
    #[must_use]
    pub const fn lead_id(&self) -> Option<i64> {
        self.lead_id
    }

    /// Returns the customer name.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Returns the service description.
    #[must_use]
    pub fn service_description(&self) -> Option<&str> {
        self.service_description.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> LeadStatus {
        self.status
    }

    /// Returns the originally planned service window.
    #[must_use]
    pub const fn task_window(&self) -> DateSpan {
        self.task_window
    }

    /// Returns the follow-up window set by the last `Confirm`/`Reschedule`.
    ///
    /// `None` until the lead is scheduled, and again after a revert to `BID`.
    #[must_use]
    pub const fn follow_up(&self) -> Option<DateSpan> {
        self.follow_up
    }

    /// Returns the window currently in effect.
    ///
    /// This is the follow-up window when one is set, otherwise the original
    /// task window.
    #[must_use]
    pub fn effective_window(&self) -> DateSpan {
        self.follow_up.unwrap_or(self.task_window)
    }

    /// Returns the full history in insertion order.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the number of committed transitions.
    ///
    /// Every committed transition increments the revision by exactly one,
    /// which makes it usable as an optimistic-concurrency token.
    #[must_use]
    pub const fn revision(&self) -> usize {
        self.history.len()
    }

    /// Returns the cancellation reason, if the lead was cancelled.
    #[must_use]
    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    /// Returns a new lead with `entry` appended and status fields updated.
    ///
    /// The entry is assumed to have been produced by the status machine
    /// against this lead's current snapshot.
    #[must_use]
    pub fn append_transition(&self, entry: HistoryEntry) -> Self {
        let mut next: Self = self.clone();
        next.status = entry.to_status;

        match entry.to_status {
            LeadStatus::Confirm | LeadStatus::Reschedule => {
                next.follow_up = entry.new_window();
            }
            LeadStatus::Bid => {
                next.follow_up = None;
            }
            LeadStatus::Cancelled => {
                next.cancellation_reason.clone_from(&entry.reason);
            }
        }

        next.history.push(entry);
        next
    }
}
