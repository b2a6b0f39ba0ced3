// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! History reconciliation.
//!
//! Collapses a lead's raw history into the entries an operator needs to
//! follow what changed and when. This is a one-lookback filter, not global
//! deduplication: two identical entries separated by a different one are
//! both kept, since each was a real change when it happened.

use fieldops_domain::{DateSpan, HistoryEntry, Lead, LeadStatus, fold_effective_window};
use tracing::debug;

/// Filters `history` down to the entries that carry information.
///
/// The first entry is always kept. A later entry is dropped if:
/// - it has the same `to_status` and `new_date` as the last kept entry, or
/// - it is a `Confirm -> Confirm` entry whose `new_date` equals its
///   `prev_date`.
///
/// Kept entries are returned unchanged and in their original order.
/// Reconciling an already reconciled sequence returns it unchanged.
#[must_use]
pub fn reconcile(history: &[HistoryEntry]) -> Vec<HistoryEntry> {
    let mut kept: Vec<HistoryEntry> = Vec::with_capacity(history.len());

    for entry in history {
        let redundant: bool = kept
            .last()
            .is_some_and(|previous| is_repeat(previous, entry) || is_unmoved_confirm(entry));
        if !redundant {
            kept.push(entry.clone());
        }
    }

    if kept.len() != history.len() {
        debug!(
            raw = history.len(),
            kept = kept.len(),
            "Dropped redundant history entries"
        );
    }

    kept
}

fn is_repeat(previous: &HistoryEntry, entry: &HistoryEntry) -> bool {
    entry.to_status == previous.to_status && entry.new_date == previous.new_date
}

fn is_unmoved_confirm(entry: &HistoryEntry) -> bool {
    entry.from_status == LeadStatus::Confirm
        && entry.to_status == LeadStatus::Confirm
        && entry.new_date == Some(entry.prev_date)
}

/// A reconciled history together with the facts derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledHistory {
    entries: Vec<HistoryEntry>,
    is_simple_confirm: bool,
    original: DateSpan,
    effective: DateSpan,
}

impl ReconciledHistory {
    /// Reconciles a lead's history.
    #[must_use]
    pub fn from_lead(lead: &Lead) -> Self {
        Self::from_history(lead.history(), lead.task_window())
    }

    /// Reconciles a raw history against the lead's original task window.
    ///
    /// # Arguments
    ///
    /// * `history` - The raw history in insertion order
    /// * `task_window` - The lead's originally planned window
    #[must_use]
    pub fn from_history(history: &[HistoryEntry], task_window: DateSpan) -> Self {
        let entries: Vec<HistoryEntry> = reconcile(history);

        let original: DateSpan = history
            .first()
            .map_or(task_window, HistoryEntry::prev_window);

        // Folded over the raw history so an entry dropped for repeating a
        // start date cannot leave a stale end date in effect.
        let effective: DateSpan = fold_effective_window(history, original);

        let is_simple_confirm: bool = matches!(
            entries.as_slice(),
            [only] if only.from_status == LeadStatus::Bid
                && only.to_status == LeadStatus::Confirm
                && only.new_date == Some(only.prev_date)
        );

        Self {
            entries,
            is_simple_confirm,
            original,
            effective,
        }
    }

    /// Returns the reconciled entries.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Returns true if the lead was confirmed once, on its original date.
    #[must_use]
    pub const fn is_simple_confirm(&self) -> bool {
        self.is_simple_confirm
    }

    /// Returns the window the lead was first proposed for.
    ///
    /// This is the previous window of the first raw entry, or the task
    /// window when there is no history.
    #[must_use]
    pub const fn original(&self) -> DateSpan {
        self.original
    }

    /// Returns the window currently in effect.
    #[must_use]
    pub const fn effective(&self) -> DateSpan {
        self.effective
    }
}
