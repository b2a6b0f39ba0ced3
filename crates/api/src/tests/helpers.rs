// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use fieldops::{FixedClock, TransitionResult};
use fieldops_domain::Lead;
use time::Date;
use time::macros::{date, datetime};

use crate::{ChangeLeadStatusRequest, CreateLeadRequest, change_lead_status, create_lead};

pub fn create_test_clock() -> FixedClock {
    FixedClock::new(datetime!(2026-02-01 09:00 UTC), date!(2026 - 02 - 01))
}

pub fn create_test_request() -> CreateLeadRequest {
    CreateLeadRequest {
        customer_name: String::from("Lakeside Dental"),
        service_description: Some(String::from("Replace two rooftop units")),
        task_start_date: date!(2026 - 03 - 01),
        task_end_date: date!(2026 - 03 - 01),
    }
}

/// A lead as it looks after the lead store assigned it id 7.
pub fn create_stored_lead() -> Lead {
    create_lead(&create_test_request()).unwrap().with_lead_id(7)
}

pub fn status_request(new_status: &str, start: Option<Date>) -> ChangeLeadStatusRequest {
    ChangeLeadStatusRequest {
        new_status: new_status.to_string(),
        proposed_start_date: start,
        proposed_end_date: None,
        reason: None,
    }
}

/// Applies a status change that is expected to succeed.
pub fn transition(lead: &Lead, new_status: &str, start: Option<Date>) -> Lead {
    let clock: FixedClock = create_test_clock();
    let request: ChangeLeadStatusRequest = status_request(new_status, start);
    let result: TransitionResult = change_lead_status(lead, request, &clock).unwrap();
    result.new_lead
}

/// The stored lead after confirming it for `day`.
pub fn confirmed_lead(day: Date) -> Lead {
    transition(&create_stored_lead(), "Confirm", Some(day))
}
