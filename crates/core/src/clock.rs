// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use chrono_tz::Tz;
use fieldops_domain::business_today;
use time::{Date, OffsetDateTime};

/// Source of "now" and "today" for transition validation.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> OffsetDateTime;

    /// Returns the current business day.
    ///
    /// # Errors
    ///
    /// Returns an error if the current instant cannot be mapped to a
    /// calendar date.
    fn today(&self) -> Result<Date, CoreError>;
}

/// Wall clock whose "today" is the calendar date in a business timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessClock {
    timezone: Tz,
}

impl BusinessClock {
    /// Creates a clock for the given timezone.
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Returns the business timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }
}

impl Clock for BusinessClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn today(&self) -> Result<Date, CoreError> {
        Ok(business_today(self.timezone, self.now())?)
    }
}

/// A clock frozen at a fixed instant and business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: OffsetDateTime,
    today: Date,
}

impl FixedClock {
    /// Creates a clock that always reports the given values.
    #[must_use]
    pub const fn new(now: OffsetDateTime, today: Date) -> Self {
        Self { now, today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now
    }

    fn today(&self) -> Result<Date, CoreError> {
        Ok(self.today)
    }
}
