// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business-day calendar.
//!
//! "Today" for scheduling rules is the calendar date in the business's
//! declared timezone, not the server's UTC date. A reschedule entered at
//! 20:00 in `America/Chicago` must be judged against the Chicago date.

use crate::error::DomainError;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use time::{Date, Month, OffsetDateTime};

/// Parses an IANA timezone name.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Returns the calendar date of `now` in the given timezone.
///
/// # Arguments
///
/// * `timezone` - The business timezone
/// * `now` - The current instant
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the instant cannot be
/// represented in the target calendar.
pub fn business_today(timezone: Tz, now: OffsetDateTime) -> Result<Date, DomainError> {
    // Convert time::OffsetDateTime to chrono::DateTime<Utc>
    let instant: DateTime<Utc> = DateTime::from_timestamp(now.unix_timestamp(), now.nanosecond())
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("converting {now} to a UTC instant"),
        })?;

    let local = instant.with_timezone(&timezone).date_naive();

    // Convert chrono::NaiveDate back to time::Date
    let month: Month = u8::try_from(local.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("converting month of {local}"),
        })?;
    let day: u8 = u8::try_from(local.day()).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("converting day of {local}"),
    })?;

    Date::from_calendar_date(local.year(), month, day).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("building date {local}: {e}"),
        }
    })
}
