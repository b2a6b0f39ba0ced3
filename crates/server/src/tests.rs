// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use fieldops::FixedClock;
use time::macros::{date, datetime};
use tower::ServiceExt;

/// Helper to create test app state with in-memory persistence and a clock
/// frozen on 2026-02-01.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(FixedClock::new(
            datetime!(2026-02-01 09:00 UTC),
            date!(2026 - 02 - 01),
        )),
    }
}

fn create_test_lead_request(customer_name: &str) -> CreateLeadApiRequest {
    CreateLeadApiRequest {
        customer_name: customer_name.to_string(),
        service_description: Some(String::from("Boiler tune-up")),
        task_start_date: String::from("2026-03-01"),
        task_end_date: String::from("2026-03-01"),
    }
}

fn status_request(new_status: &str, start: Option<&str>) -> ChangeLeadStatusApiRequest {
    ChangeLeadStatusApiRequest {
        new_status: new_status.to_string(),
        proposed_start_date: start.map(ToString::to_string),
        proposed_end_date: None,
        reason: None,
    }
}

async fn post_json<T: Serialize + Sync>(app: &Router, uri: &str, body: &T) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get_uri(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

async fn create_lead_via_api(app: &Router, customer_name: &str) -> i64 {
    let response = post_json(app, "/leads", &create_test_lead_request(customer_name)).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let created: CreateLeadResponse = read_json(response).await;
    created.lead.lead_id
}

#[tokio::test]
async fn test_create_lead_succeeds() {
    let app: Router = build_router(create_test_app_state());

    let request: CreateLeadApiRequest = create_test_lead_request("Elm Street Clinic");
    let response = post_json(&app, "/leads", &request).await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let created: CreateLeadResponse = read_json(response).await;
    assert!(created.lead.lead_id > 0);
    assert_eq!(created.lead.status, "BID");
    assert_eq!(created.lead.revision, 0);
    assert_eq!(created.lead.customer_name, "Elm Street Clinic");
}

#[tokio::test]
async fn test_create_lead_with_bad_date_returns_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let mut request: CreateLeadApiRequest = create_test_lead_request("Elm Street Clinic");
    request.task_start_date = String::from("March 1st");

    let response = post_json(&app, "/leads", &request).await;

    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    let error_response: ErrorResponse = read_json(response).await;
    assert!(error_response.error);
    assert!(error_response.message.contains("task_start_date"));
}

#[tokio::test]
async fn test_create_lead_with_blank_customer_returns_bad_request() {
    let app: Router = build_router(create_test_app_state());

    let response = post_json(&app, "/leads", &create_test_lead_request("   ")).await;

    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_lead_returns_not_found() {
    let app: Router = build_router(create_test_app_state());

    let response = get_uri(&app, "/leads/999").await;

    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    let error_response: ErrorResponse = read_json(response).await;
    assert!(error_response.message.contains("999"));
}

#[tokio::test]
async fn test_confirm_then_reschedule_workflow() {
    let app: Router = build_router(create_test_app_state());
    let lead_id: i64 = create_lead_via_api(&app, "Elm Street Clinic").await;

    let response = post_json(
        &app,
        &format!("/leads/{lead_id}/status"),
        &status_request("Confirm", Some("2026-03-01")),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let confirmed: ChangeLeadStatusResponse = read_json(response).await;
    assert_eq!(confirmed.lead.status, "Confirm");
    assert_eq!(confirmed.lead.revision, 1);
    assert_eq!(confirmed.entry.from_status, LeadStatus::Bid);

    let view: LeadViewResponse =
        read_json(get_uri(&app, &format!("/leads/{lead_id}/view")).await).await;
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].text, "Confirmed For: 2026-03-01");

    let response = post_json(
        &app,
        &format!("/leads/{lead_id}/status"),
        &status_request("Reschedule", Some("2026-03-10")),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let view: LeadViewResponse =
        read_json(get_uri(&app, &format!("/leads/{lead_id}/view")).await).await;
    assert!(view.lines[0].struck);
    let last = view.lines.last().unwrap();
    assert_eq!(last.text, "RESCHEDULED TO: 2026-03-10");
    assert!(last.current);

    let prefill: TicketPrefillResponse =
        read_json(get_uri(&app, &format!("/leads/{lead_id}/ticket_prefill")).await).await;
    assert_eq!(prefill.status, "Reschedule");
    assert_eq!(prefill.effective_date, "2026-03-10");
}

#[tokio::test]
async fn test_past_reschedule_is_rejected_without_writing_history() {
    let app: Router = build_router(create_test_app_state());
    let lead_id: i64 = create_lead_via_api(&app, "Elm Street Clinic").await;

    let response = post_json(
        &app,
        &format!("/leads/{lead_id}/status"),
        &status_request("Reschedule", Some("2026-01-15")),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    let error_response: ErrorResponse = read_json(response).await;
    assert!(error_response.message.contains("past_date_not_allowed"));

    let history: LeadHistoryResponse =
        read_json(get_uri(&app, &format!("/leads/{lead_id}/history")).await).await;
    assert!(history.raw.is_empty());
    assert_eq!(history.status, "BID");
}

#[tokio::test]
async fn test_cancelled_lead_is_terminal() {
    let app: Router = build_router(create_test_app_state());
    let lead_id: i64 = create_lead_via_api(&app, "Elm Street Clinic").await;

    let mut cancel: ChangeLeadStatusApiRequest = status_request("Cancelled", None);
    cancel.reason = Some(String::from("Customer chose another contractor"));
    let response = post_json(&app, &format!("/leads/{lead_id}/status"), &cancel).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let cancelled: ChangeLeadStatusResponse = read_json(response).await;
    assert_eq!(
        cancelled.lead.cancellation_reason.as_deref(),
        Some("Customer chose another contractor")
    );

    let response = post_json(
        &app,
        &format!("/leads/{lead_id}/status"),
        &status_request("Confirm", Some("2026-03-01")),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

    let view: LeadViewResponse =
        read_json(get_uri(&app, &format!("/leads/{lead_id}/view")).await).await;
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].text, "CANCELLED: 2026-03-01");
    assert!(view.lines[0].struck);
    assert_eq!(view.lines[0].tone, "red");
}

#[tokio::test]
async fn test_history_endpoint_reports_reconciled_entries() {
    let app: Router = build_router(create_test_app_state());
    let lead_id: i64 = create_lead_via_api(&app, "Elm Street Clinic").await;

    for _ in 0..2 {
        let response = post_json(
            &app,
            &format!("/leads/{lead_id}/status"),
            &status_request("Confirm", Some("2026-03-01")),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    let history: LeadHistoryResponse =
        read_json(get_uri(&app, &format!("/leads/{lead_id}/history")).await).await;

    assert_eq!(history.raw.len(), 2);
    assert_eq!(history.reconciled.len(), 1);
    assert!(history.is_simple_confirm);
    assert!(history.raw[1].timestamp > history.raw[0].timestamp);
}

#[tokio::test]
async fn test_list_leads_filters_by_status() {
    let app: Router = build_router(create_test_app_state());
    let first: i64 = create_lead_via_api(&app, "Elm Street Clinic").await;
    let second: i64 = create_lead_via_api(&app, "Harbor Marina").await;

    let response = post_json(
        &app,
        &format!("/leads/{second}/status"),
        &status_request("Confirm", Some("2026-03-01")),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let all: ListLeadsResponse = read_json(get_uri(&app, "/leads").await).await;
    assert_eq!(all.leads.len(), 2);

    let bids: ListLeadsResponse = read_json(get_uri(&app, "/leads?status=BID").await).await;
    let ids: Vec<i64> = bids.leads.iter().map(|l| l.lead_id).collect();
    assert_eq!(ids, vec![first]);

    let response = get_uri(&app, "/leads?status=Scheduled").await;
    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_change_on_missing_lead_returns_not_found() {
    let app: Router = build_router(create_test_app_state());

    let response = post_json(
        &app,
        "/leads/42/status",
        &status_request("Confirm", Some("2026-03-01")),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

#[test]
fn test_api_errors_map_to_status_codes() {
    let cases: Vec<(ApiError, StatusCode)> = vec![
        (
            ApiError::InvalidInput {
                field: String::from("status"),
                message: String::from("bad"),
            },
            StatusCode::BAD_REQUEST,
        ),
        (
            ApiError::DomainRuleViolation {
                rule: String::from("missing_reason"),
                message: String::from("A cancellation reason is required"),
            },
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            ApiError::ResourceNotFound {
                resource_type: String::from("Lead"),
                message: String::from("Lead 1 does not exist"),
            },
            StatusCode::NOT_FOUND,
        ),
        (
            ApiError::StaleState {
                message: String::from("Lead 1 changed"),
            },
            StatusCode::CONFLICT,
        ),
        (
            ApiError::Internal {
                message: String::from("boom"),
            },
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(HttpError::from(err).status, expected);
    }
}

#[test]
fn test_stale_commit_maps_to_conflict() {
    let err: HttpError = HttpError::from(PersistenceError::StaleState {
        lead_id: 3,
        expected_revision: 1,
    });

    assert_eq!(err.status, StatusCode::CONFLICT);
}
