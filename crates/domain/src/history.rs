// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead follow-up history records.

use crate::dates::{DateSpan, iso_date, rfc3339};
use crate::lead_status::LeadStatus;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// An immutable record of one lead status transition.
///
/// Entries are appended to a lead's history when a transition is committed
/// and are never edited or removed afterwards. `Lead` only hands them out by
/// shared reference.
///
/// The serialized form uses the camelCase field names of the history wire
/// format, with `YYYY-MM-DD` dates and an RFC 3339 `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The status the lead had before the transition.
    pub from_status: LeadStatus,
    /// The status the transition moved the lead to.
    pub to_status: LeadStatus,
    /// The start date in effect immediately before the transition.
    #[serde(with = "iso_date")]
    pub prev_date: Date,
    /// The end date in effect immediately before the transition.
    #[serde(with = "iso_date::option", default)]
    pub prev_end_date: Option<Date>,
    /// The start date put into effect (`Confirm`/`Reschedule` only).
    #[serde(with = "iso_date::option", default)]
    pub new_date: Option<Date>,
    /// The end date put into effect (`Confirm`/`Reschedule` only).
    #[serde(with = "iso_date::option", default)]
    pub new_end_date: Option<Date>,
    /// Free-text reason supplied by the operator.
    #[serde(default)]
    pub reason: Option<String>,
    /// When the transition was recorded.
    #[serde(with = "rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl HistoryEntry {
    /// Returns the window that was in effect before this transition.
    #[must_use]
    pub const fn prev_window(&self) -> DateSpan {
        DateSpan::new(self.prev_date, self.prev_end_date)
    }

    /// Returns the window this transition put into effect, if any.
    #[must_use]
    pub fn new_window(&self) -> Option<DateSpan> {
        self.new_date
            .map(|start| DateSpan::new(start, self.new_end_date))
    }
}

/// Folds a sequence of history entries into the window in effect after them.
///
/// - `Confirm`/`Reschedule` entries put their new window into effect.
/// - `BID` entries revert to the original window.
/// - `Cancelled` entries leave the previous window in place.
///
/// An empty sequence yields `original`.
#[must_use]
pub fn fold_effective_window<'a, I>(entries: I, original: DateSpan) -> DateSpan
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    entries
        .into_iter()
        .fold(original, |effective, entry| match entry.to_status {
            LeadStatus::Confirm | LeadStatus::Reschedule => {
                entry.new_window().unwrap_or(effective)
            }
            LeadStatus::Bid => original,
            LeadStatus::Cancelled => effective,
        })
}
