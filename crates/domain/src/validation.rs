// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::Date;

/// Validates that a window's end date is not before its start date.
///
/// A missing end date is always valid.
///
/// # Errors
///
/// Returns `DomainError::EndBeforeStart` if `end < start`.
pub fn validate_window_order(start: Date, end: Option<Date>) -> Result<(), DomainError> {
    match end {
        Some(end) if end < start => Err(DomainError::EndBeforeStart { start, end }),
        _ => Ok(()),
    }
}

/// Validates the fields supplied when a lead is created.
///
/// # Arguments
///
/// * `customer_name` - The customer the lead belongs to
/// * `task_start_date` - The originally planned first service day
/// * `task_end_date` - The originally planned last service day
///
/// # Errors
///
/// Returns an error if:
/// - The customer name is empty
/// - The task end date is before the task start date
pub fn validate_lead_fields(
    customer_name: &str,
    task_start_date: Date,
    task_end_date: Date,
) -> Result<(), DomainError> {
    // Rule: a lead must name its customer
    if customer_name.trim().is_empty() {
        return Err(DomainError::InvalidLeadField {
            field: "customer_name",
            message: String::from("Customer name cannot be empty"),
        });
    }

    validate_window_order(task_start_date, Some(task_end_date))
}
