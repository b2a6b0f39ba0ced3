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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    change_lead_status, create_lead, get_lead_history, get_lead_view, get_ticket_prefill,
    lead_info, list_leads, parse_date_field, parse_optional_date_field, parse_status_filter,
};
pub use request_response::{
    ChangeLeadStatusRequest, ChangeLeadStatusResponse, CreateLeadRequest, CreateLeadResponse,
    DisplayLineInfo, LeadHistoryResponse, LeadInfo, LeadViewResponse, ListLeadsResponse,
    TicketPrefillResponse,
};
