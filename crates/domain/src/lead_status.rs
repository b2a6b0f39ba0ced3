// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead status tracking and transition rules.
//!
//! A lead moves through `BID`, `Confirm`, `Reschedule` and `Cancelled`.
//! Status changes are operator-initiated only; the system never advances
//! a lead based on time alone.

use crate::dates::DateSpan;
use crate::error::DomainError;
use crate::validation::validate_window_order;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Lead status states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    /// Quoted but not yet scheduled.
    #[serde(rename = "BID")]
    Bid,
    /// Scheduled for a confirmed date.
    Confirm,
    /// Moved to a new date after being scheduled.
    Reschedule,
    /// Withdrawn. Terminal.
    Cancelled,
}

impl LeadStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Bid, Self::Confirm, Self::Reschedule, Self::Cancelled];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bid => "BID",
            Self::Confirm => "Confirm",
            Self::Reschedule => "Reschedule",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "BID" => Ok(Self::Bid),
            "Confirm" => Ok(Self::Confirm),
            "Reschedule" => Ok(Self::Reschedule),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if entering this status puts a new date window into effect.
    #[must_use]
    pub const fn sets_schedule(&self) -> bool {
        matches!(self, Self::Confirm | Self::Reschedule)
    }

    /// Validates a proposed status change against this (current) status.
    ///
    /// Rules are evaluated in order and the first failure wins:
    /// terminal state, then the per-status date and reason rules.
    ///
    /// # Arguments
    ///
    /// * `change` - The proposed change
    /// * `effective` - The window currently in effect for the lead
    /// * `today` - The current business day
    ///
    /// # Errors
    ///
    /// Returns the first rule the change violates.
    pub fn validate_transition(
        &self,
        change: &StatusChange,
        effective: &DateSpan,
        today: Date,
    ) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::TerminalStateViolation {
                current: *self,
                requested: change.new_status,
            });
        }

        match change.new_status {
            Self::Reschedule => {
                let start: Date = change.start_date.ok_or(DomainError::MissingDate {
                    status: change.new_status,
                })?;
                if start < today {
                    return Err(DomainError::PastDateNotAllowed { date: start, today });
                }
                validate_window_order(start, change.end_date)?;

                let proposed: DateSpan = DateSpan::new(start, change.end_date);
                if proposed.same_days(effective) {
                    return Err(DomainError::NoChangeDetected { proposed });
                }
                Ok(())
            }
            Self::Confirm => {
                let start: Date = change.start_date.ok_or(DomainError::MissingDate {
                    status: change.new_status,
                })?;
                validate_window_order(start, change.end_date)
            }
            Self::Cancelled => {
                if change.reason().is_none() {
                    return Err(DomainError::MissingReason);
                }
                Ok(())
            }
            // Reverting to BID carries no date constraints.
            Self::Bid => Ok(()),
        }
    }
}

impl FromStr for LeadStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed status change for one lead, as entered by an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// The status being requested.
    pub new_status: LeadStatus,
    /// The proposed start date.
    pub start_date: Option<Date>,
    /// The proposed end date.
    pub end_date: Option<Date>,
    /// Free-text reason supplied by the operator.
    pub reason: Option<String>,
}

impl StatusChange {
    /// Returns the trimmed reason, or `None` if it is missing or blank.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
    }
}
