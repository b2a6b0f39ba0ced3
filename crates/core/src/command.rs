// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// A command represents operator intent as data only.
///
/// Commands are the only way to request lead changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new lead in `BID` status.
    CreateLead {
        /// The customer the lead belongs to.
        customer_name: String,
        /// Optional description of the planned work.
        service_description: Option<String>,
        /// The originally planned first service day.
        task_start_date: Date,
        /// The originally planned last service day.
        task_end_date: Date,
    },
    /// Move a lead to a new status.
    ChangeStatus {
        /// The requested status, exactly as the operator supplied it.
        /// Parsed during validation so unknown values surface as
        /// `InvalidStatus`.
        new_status: String,
        /// The proposed start date.
        proposed_start_date: Option<Date>,
        /// The proposed end date.
        proposed_end_date: Option<Date>,
        /// Free-text reason, required for cancellation.
        reason: Option<String>,
    },
}

impl Command {
    /// Returns the command name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateLead { .. } => "CreateLead",
            Self::ChangeStatus { .. } => "ChangeStatus",
        }
    }
}
