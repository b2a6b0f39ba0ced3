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

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use fieldops::{BusinessClock, Clock, TransitionResult};
use fieldops_api::{
    ApiError, ChangeLeadStatusRequest, ChangeLeadStatusResponse, CreateLeadRequest,
    CreateLeadResponse, LeadHistoryResponse, LeadInfo, LeadViewResponse, ListLeadsResponse,
    TicketPrefillResponse, change_lead_status, create_lead, get_lead_history, get_lead_view,
    get_ticket_prefill, lead_info, list_leads, parse_date_field, parse_optional_date_field,
    parse_status_filter, translate_persistence_error,
};
use fieldops_domain::{Lead, LeadStatus, parse_timezone};
use fieldops_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Field Operations Server - HTTP server for the lead lifecycle engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone that decides the current business day
    #[arg(short, long, default_value = "UTC")]
    timezone: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The lead store.
    persistence: Arc<Mutex<Persistence>>,
    /// Source of "now" and the business day for status rules.
    clock: Arc<dyn Clock + Send + Sync>,
}

/// API request for creating a lead.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateLeadApiRequest {
    /// The customer the lead belongs to.
    customer_name: String,
    /// Optional description of the planned work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_description: Option<String>,
    /// The originally planned first service day (`YYYY-MM-DD`).
    task_start_date: String,
    /// The originally planned last service day (`YYYY-MM-DD`).
    task_end_date: String,
}

/// API request for changing a lead's status.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ChangeLeadStatusApiRequest {
    /// The requested status.
    new_status: String,
    /// The proposed start date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    proposed_start_date: Option<String>,
    /// The proposed end date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    proposed_end_date: Option<String>,
    /// Free-text reason, required for cancellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Query parameters for listing leads.
#[derive(Debug, Deserialize)]
struct ListLeadsQuery {
    /// Only list leads in this status.
    status: Option<String>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always `true`.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::StaleState { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        Self::from(translate_persistence_error(err))
    }
}

/// Handler for POST `/leads` endpoint.
///
/// Creates a new lead in `BID` status.
async fn handle_create_lead(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateLeadApiRequest>,
) -> Result<Json<CreateLeadResponse>, HttpError> {
    info!(customer_name = %req.customer_name, "Handling create_lead request");

    let request: CreateLeadRequest = CreateLeadRequest {
        customer_name: req.customer_name,
        service_description: req.service_description,
        task_start_date: parse_date_field("task_start_date", &req.task_start_date)?,
        task_end_date: parse_date_field("task_end_date", &req.task_end_date)?,
    };
    let lead: Lead = create_lead(&request)?;

    let mut persistence = app_state.persistence.lock().await;
    let stored: Lead = persistence.create_lead(&lead)?;
    drop(persistence);

    let lead: LeadInfo = lead_info(&stored)?;
    info!(lead_id = lead.lead_id, "Created lead");

    Ok(Json(CreateLeadResponse {
        message: format!("Created lead {} for {}", lead.lead_id, lead.customer_name),
        lead,
    }))
}

/// Handler for GET `/leads` endpoint.
///
/// Lists leads, optionally filtered by `?status=`.
async fn handle_list_leads(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListLeadsQuery>,
) -> Result<Json<ListLeadsResponse>, HttpError> {
    info!(status = ?query.status, "Handling list_leads request");

    let status: Option<LeadStatus> = parse_status_filter(query.status.as_deref())?;

    let mut persistence = app_state.persistence.lock().await;
    let leads: Vec<Lead> = persistence.list_leads(status)?;
    drop(persistence);

    Ok(Json(list_leads(&leads)?))
}

/// Handler for GET `/leads/{lead_id}` endpoint.
async fn handle_get_lead(
    AxumState(app_state): AxumState<AppState>,
    Path(lead_id): Path<i64>,
) -> Result<Json<LeadInfo>, HttpError> {
    info!(lead_id = lead_id, "Handling get_lead request");

    let lead: Lead = load_lead(&app_state, lead_id).await?;

    Ok(Json(lead_info(&lead)?))
}

/// Handler for POST `/leads/{lead_id}/status` endpoint.
///
/// Proposes the transition against the stored snapshot, then commits it
/// only if the lead has not changed in between.
async fn handle_change_lead_status(
    AxumState(app_state): AxumState<AppState>,
    Path(lead_id): Path<i64>,
    Json(req): Json<ChangeLeadStatusApiRequest>,
) -> Result<Json<ChangeLeadStatusResponse>, HttpError> {
    info!(
        lead_id = lead_id,
        new_status = %req.new_status,
        "Handling change_lead_status request"
    );

    let request: ChangeLeadStatusRequest = ChangeLeadStatusRequest {
        new_status: req.new_status,
        proposed_start_date: parse_optional_date_field(
            "proposed_start_date",
            req.proposed_start_date.as_deref(),
        )?,
        proposed_end_date: parse_optional_date_field(
            "proposed_end_date",
            req.proposed_end_date.as_deref(),
        )?,
        reason: req.reason,
    };

    let lead: Lead = load_lead(&app_state, lead_id).await?;

    let result: TransitionResult = change_lead_status(&lead, request, app_state.clock.as_ref())
        .inspect_err(|e| warn!(lead_id = lead_id, error = %e, "Rejected status change"))?;

    let mut persistence = app_state.persistence.lock().await;
    let history_id: i64 = persistence.commit_transition(&result)?;
    drop(persistence);

    info!(
        lead_id = lead_id,
        history_id = history_id,
        status = %result.new_lead.status(),
        revision = result.new_lead.revision(),
        "Committed status change"
    );

    Ok(Json(ChangeLeadStatusResponse {
        lead: lead_info(&result.new_lead)?,
        message: format!(
            "Lead {lead_id} moved from {} to {}",
            result.entry.from_status, result.entry.to_status
        ),
        entry: result.entry,
    }))
}

/// Handler for GET `/leads/{lead_id}/history` endpoint.
///
/// Returns the raw history next to its reconciled form.
async fn handle_get_lead_history(
    AxumState(app_state): AxumState<AppState>,
    Path(lead_id): Path<i64>,
) -> Result<Json<LeadHistoryResponse>, HttpError> {
    info!(lead_id = lead_id, "Handling get_lead_history request");

    let lead: Lead = load_lead(&app_state, lead_id).await?;

    Ok(Json(get_lead_history(&lead)?))
}

/// Handler for GET `/leads/{lead_id}/view` endpoint.
async fn handle_get_lead_view(
    AxumState(app_state): AxumState<AppState>,
    Path(lead_id): Path<i64>,
) -> Result<Json<LeadViewResponse>, HttpError> {
    info!(lead_id = lead_id, "Handling get_lead_view request");

    let lead: Lead = load_lead(&app_state, lead_id).await?;

    Ok(Json(get_lead_view(&lead)?))
}

/// Handler for GET `/leads/{lead_id}/ticket_prefill` endpoint.
async fn handle_get_ticket_prefill(
    AxumState(app_state): AxumState<AppState>,
    Path(lead_id): Path<i64>,
) -> Result<Json<TicketPrefillResponse>, HttpError> {
    info!(lead_id = lead_id, "Handling get_ticket_prefill request");

    let lead: Lead = load_lead(&app_state, lead_id).await?;

    Ok(Json(get_ticket_prefill(&lead)?))
}

async fn load_lead(app_state: &AppState, lead_id: i64) -> Result<Lead, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let lead: Lead = persistence.get_lead(lead_id)?;
    drop(persistence);
    Ok(lead)
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/leads", post(handle_create_lead))
        .route("/leads", get(handle_list_leads))
        .route("/leads/{lead_id}", get(handle_get_lead))
        .route("/leads/{lead_id}/status", post(handle_change_lead_status))
        .route("/leads/{lead_id}/history", get(handle_get_lead_history))
        .route("/leads/{lead_id}/view", get(handle_get_lead_view))
        .route(
            "/leads/{lead_id}/ticket_prefill",
            get(handle_get_ticket_prefill),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Field Operations Server");

    let clock: BusinessClock = BusinessClock::new(parse_timezone(&args.timezone)?);
    info!(timezone = %clock.timezone(), "Using business timezone");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(clock),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
