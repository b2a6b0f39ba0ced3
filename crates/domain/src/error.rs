// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::DateSpan;
use crate::lead_status::LeadStatus;
use time::Date;

/// Errors that can occur during domain validation.
///
/// The first seven variants are operator input errors raised by the lead
/// status machine. They are never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The requested status is not one of the known lead statuses.
    #[error("Invalid lead status: '{status}'")]
    InvalidStatus {
        /// The raw status value that was supplied.
        status: String,
    },
    /// The lead is in a terminal status and accepts no further transitions.
    #[error("Lead is {current} and cannot transition to {requested}")]
    TerminalStateViolation {
        /// The lead's current status.
        current: LeadStatus,
        /// The status that was requested.
        requested: LeadStatus,
    },
    /// A start date is required for the requested status.
    #[error("A start date is required to move a lead to {status}")]
    MissingDate {
        /// The status that requires a date.
        status: LeadStatus,
    },
    /// A reschedule date lies before the current business day.
    #[error("Reschedule date {date} is in the past (today is {today})")]
    PastDateNotAllowed {
        /// The proposed start date.
        date: Date,
        /// The business day the proposal was evaluated against.
        today: Date,
    },
    /// The proposed end date is before the proposed start date.
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart {
        /// The proposed start date.
        start: Date,
        /// The proposed end date.
        end: Date,
    },
    /// A reschedule proposes the dates that are already in effect.
    #[error("Proposed dates {proposed} match the dates already in effect")]
    NoChangeDetected {
        /// The proposed window.
        proposed: DateSpan,
    },
    /// Cancelling a lead requires a non-empty reason.
    #[error("A cancellation reason is required")]
    MissingReason,
    /// A descriptive lead field is empty or invalid.
    #[error("Invalid {field}: {message}")]
    InvalidLeadField {
        /// The field name.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },
    /// The configured business timezone is not a known IANA name.
    #[error("Invalid timezone: '{0}'")]
    InvalidTimezone(String),
    /// Failed to parse a date or timestamp from a string.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A date conversion or arithmetic step overflowed.
    #[error("Date arithmetic overflow while {operation}")]
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl DomainError {
    /// Returns a stable rule identifier for this error.
    ///
    /// Used by the API layer when reporting rule violations.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::InvalidStatus { .. } => "invalid_status",
            Self::TerminalStateViolation { .. } => "terminal_state",
            Self::MissingDate { .. } => "missing_date",
            Self::PastDateNotAllowed { .. } => "past_date_not_allowed",
            Self::EndBeforeStart { .. } => "end_before_start",
            Self::NoChangeDetected { .. } => "no_change_detected",
            Self::MissingReason => "missing_reason",
            Self::InvalidLeadField { .. } => "invalid_lead_field",
            Self::InvalidTimezone(_) => "invalid_timezone",
            Self::DateParseError { .. } => "date_parse",
            Self::DateArithmeticOverflow { .. } => "date_overflow",
        }
    }
}
