// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fieldops_domain::DomainError;

/// Errors that can occur during lead transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A status change was requested for a lead that has not been stored yet.
    LeadNotPersisted,
    /// A command was routed to the wrong entry point.
    UnsupportedCommand(&'static str),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::LeadNotPersisted => {
                write!(f, "Lead must be persisted before its status can change")
            }
            Self::UnsupportedCommand(name) => {
                write!(f, "Command {name} is not supported here")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
