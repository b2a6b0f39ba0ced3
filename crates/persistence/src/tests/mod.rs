// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use fieldops::{Command, FixedClock, TransitionResult, apply, apply_create};
use fieldops_domain::Lead;
use time::Date;
use time::macros::{date, datetime};

pub fn create_test_clock() -> FixedClock {
    FixedClock::new(datetime!(2026-02-01 09:00 UTC), date!(2026 - 02 - 01))
}

pub fn create_test_lead(customer_name: &str) -> Lead {
    apply_create(Command::CreateLead {
        customer_name: customer_name.to_string(),
        service_description: Some(String::from("Rooftop unit inspection")),
        task_start_date: date!(2026 - 03 - 01),
        task_end_date: date!(2026 - 03 - 01),
    })
    .unwrap()
}

pub fn propose(
    lead: &Lead,
    new_status: &str,
    start: Option<Date>,
    reason: Option<&str>,
) -> TransitionResult {
    apply(
        lead,
        Command::ChangeStatus {
            new_status: new_status.to_string(),
            proposed_start_date: start,
            proposed_end_date: None,
            reason: reason.map(ToString::to_string),
        },
        &create_test_clock(),
    )
    .unwrap()
}
