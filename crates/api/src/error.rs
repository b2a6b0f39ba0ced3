// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fieldops::CoreError;
use fieldops_domain::DomainError;
use fieldops_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A lead status rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The lead changed after the transition was proposed.
    ///
    /// The caller should reload the lead and re-propose, never resubmit
    /// the same request blindly.
    StaleState {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::StaleState { message } => {
                write!(f, "Stale state: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// Status machine rejections become rule violations carrying the domain's
/// stable rule id. Malformed input becomes `InvalidInput`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStatus { .. }
        | DomainError::TerminalStateViolation { .. }
        | DomainError::MissingDate { .. }
        | DomainError::PastDateNotAllowed { .. }
        | DomainError::EndBeforeStart { .. }
        | DomainError::NoChangeDetected { .. }
        | DomainError::MissingReason => ApiError::DomainRuleViolation {
            rule: String::from(err.rule()),
            message: err.to_string(),
        },
        DomainError::InvalidLeadField { field, message } => ApiError::InvalidInput {
            field: String::from(field),
            message,
        },
        DomainError::InvalidTimezone(name) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("Unknown IANA timezone '{name}'"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("'{date_string}' is not a YYYY-MM-DD date: {error}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::Internal {
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::LeadNotPersisted | CoreError::UnsupportedCommand(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Only missing leads and stale commits are meaningful to a caller. Every
/// other storage failure is reported as internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::LeadNotFound(lead_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Lead"),
            message: format!("Lead {lead_id} does not exist"),
        },
        PersistenceError::StaleState { .. } => ApiError::StaleState {
            message: err.to_string(),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
