// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod calendar;
mod dates;
mod error;
mod history;
mod lead;
mod lead_status;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{business_today, parse_timezone};
pub use dates::{
    DateSpan, format_iso_date, format_timestamp, iso_date, parse_iso_date, parse_timestamp, rfc3339,
};
pub use error::DomainError;
pub use history::{HistoryEntry, fold_effective_window};
pub use lead::Lead;
pub use lead_status::{LeadStatus, StatusChange};
pub use validation::{validate_lead_fields, validate_window_order};
