//! HTTP request handlers for the reporting API.
//!
//! `process_request` is the batch orchestrator: validate, acquire a token,
//! count business days, mine the benefits ledger once, then walk the
//! requested mailboxes sequentially — a failure for one mailbox becomes
//! that row's error and never aborts the batch — and finally assemble and
//! render the report.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DateRange, PersonOutcome, PersonTotals, aggregate_events, assemble, count_business_days,
    normalize_email, parse_benefits,
};
use crate::error::EngineResult;
use crate::graph;
use crate::holidays::ColombiaCalendar;
use crate::ledger;
use crate::render::render_report;

use super::request::ProcessRequest;
use super::response::{ApiError, ApiErrorResponse, ProcessResponse, ProcessStats};
use super::state::AppState;

/// Maximum accepted request body size.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let output_dir = state.config().output_dir.clone();

    let cors = match state.config().frontend_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/test", get(test_handler))
        .route("/api/procesar", post(procesar_handler))
        .nest_service("/output", ServeDir::new(output_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for GET /api/health.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for GET /api/test.
async fn test_handler() -> &'static str {
    "Servidor está funcionando"
}

/// Handler for POST /api/procesar.
async fn procesar_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Correlation id for request tracking across the batch's log lines.
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "request body rejected"
            );
            let error = ApiError::new("Error al procesar la solicitud", rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    info!(
        correlation_id = %correlation_id,
        emails = request.emails.len(),
        group = %request.group_name,
        "processing report request"
    );

    match process_request(&state, &request).await {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                file_url = %response.file_url,
                processed = response.stats.processed_successfully,
                "report generated"
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, %error, "report request failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Runs the full reporting pipeline for one request.
async fn process_request(
    state: &AppState,
    request: &ProcessRequest,
) -> EngineResult<ProcessResponse> {
    let config = state.config();
    let range = request.validate()?;

    let token = graph::fetch_token(state.http(), config).await?;

    let business_days = count_business_days(range.start, range.end, &ColombiaCalendar);

    // The ledger is mined once per batch, filtered to the requested emails.
    let ledger_rows = ledger::load_ledger(&config.templates_dir);
    let benefit_hours = parse_benefits(&ledger_rows, Some(&request.email_filter()));

    let mut outcomes: HashMap<String, PersonOutcome> = HashMap::new();
    let mut processed = 0u32;

    for email in &request.emails {
        let outcome = match process_mailbox(state, &token, email, range).await {
            Ok(totals) => {
                processed += 1;
                info!(email = %email, "mailbox aggregated");
                PersonOutcome::Totals(totals)
            }
            Err(error) => {
                warn!(email = %email, %error, "mailbox failed, recording the error in its row");
                PersonOutcome::Failed {
                    error: error.to_string(),
                }
            }
        };
        outcomes.insert(normalize_email(email), outcome);
    }

    let report = assemble(
        &outcomes,
        &benefit_hours,
        &request.emails,
        range,
        business_days,
        processed,
    );
    let filename = render_report(&report, &config.output_dir)?;

    Ok(ProcessResponse {
        success: true,
        file_url: format!("/output/{filename}"),
        stats: ProcessStats {
            total_emails: request.emails.len(),
            processed_successfully: processed,
            business_days,
            start_date: range.start.format("%Y-%m-%d").to_string(),
            end_date: range.end.format("%Y-%m-%d").to_string(),
        },
    })
}

/// Fetches and aggregates one mailbox.
async fn process_mailbox(
    state: &AppState,
    token: &str,
    email: &str,
    range: DateRange,
) -> EngineResult<PersonTotals> {
    let timezone = state.config().timezone;
    let events = graph::fetch_events(state.http(), email, range, token, timezone.name()).await;
    aggregate_events(&events, timezone)
}
