// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar date handling for lead service windows.
//!
//! Service dates are calendar dates (`YYYY-MM-DD`), never timestamps.
//! History timestamps are RFC 3339 instants.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// A service window: a start date and an optional end date.
///
/// A window without an end date covers the start date only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    #[serde(with = "iso_date")]
    start: Date,
    #[serde(
        with = "iso_date::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    end: Option<Date>,
}

impl DateSpan {
    /// Creates a new window.
    ///
    /// No ordering check is performed here; see `validate_window_order`.
    #[must_use]
    pub const fn new(start: Date, end: Option<Date>) -> Self {
        Self { start, end }
    }

    /// Creates a window covering a single day.
    #[must_use]
    pub const fn single(day: Date) -> Self {
        Self {
            start: day,
            end: None,
        }
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the end date, if one was recorded.
    #[must_use]
    pub const fn end(&self) -> Option<Date> {
        self.end
    }

    /// Returns the last day covered by this window.
    #[must_use]
    pub fn last_day(&self) -> Date {
        self.end.unwrap_or(self.start)
    }

    /// Returns true if both windows cover the same days.
    ///
    /// A missing end date is treated as equal to the start date, so
    /// `2026-03-01` and `2026-03-01 to 2026-03-01` are the same window.
    #[must_use]
    pub fn same_days(&self, other: &Self) -> bool {
        self.start == other.start && self.last_day() == other.last_day()
    }
}

impl std::fmt::Display for DateSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end {
            Some(end) if end != self.start => write!(
                f,
                "{} to {}",
                format_iso_date(self.start),
                format_iso_date(end)
            ),
            _ => write!(f, "{}", format_iso_date(self.start)),
        }
    }
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a timestamp as RFC 3339.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339
/// (for example a year outside `0..=9999`).
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, DomainError> {
    value
        .format(&Rfc3339)
        .map_err(|e| DomainError::DateArithmeticOverflow {
            operation: format!("formatting timestamp: {e}"),
        })
}

/// Serde adapter for `YYYY-MM-DD` dates.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serializes a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_iso_date(*date))
    }

    /// Deserializes a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid date string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw).map_err(serde::de::Error::custom)
    }

    /// Serde adapter for optional `YYYY-MM-DD` dates.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        /// Serializes an optional date.
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_some(&super::super::format_iso_date(*date)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional date.
        ///
        /// # Errors
        ///
        /// Returns an error if a present value is not a valid date string.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::super::parse_iso_date(&raw))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }
}

/// Serde adapter for RFC 3339 timestamps.
pub mod rfc3339 {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    /// Serializes a timestamp as RFC 3339.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn serialize<S: Serializer>(
        value: &OffsetDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let formatted: String =
            super::format_timestamp(*value).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    /// Deserializes an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not RFC 3339.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OffsetDateTime, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
