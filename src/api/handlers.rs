//! HTTP request handlers for the Podium Engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::{assign_rewards, run_palmares};
use crate::error::EngineError;
use crate::render::render_text;

use super::request::{AssignRequest, PalmaresRequest};
use super::response::{ApiError, ApiErrorResponse, AssignResponse, PalmaresResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/palmares", post(palmares_handler))
        .route("/assign", post(assign_handler))
        .with_state(state)
}

/// Handler for POST /palmares.
///
/// Parses the configuration, runs every trusted source through the state's
/// tournament source and returns the awards with the text palmarès.
async fn palmares_handler(
    State(state): State<AppState>,
    payload: Result<Json<PalmaresRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing palmares request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = match state.parser().parse(&request.config) {
        Ok(config) => config,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let run_id = Uuid::new_v4();
    let start_time = Instant::now();
    let outcome = match run_palmares(&config.rules, &config.sources, state.source()).await {
        Ok(outcome) => outcome,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let text = render_text(&outcome.tournaments);
    info!(
        correlation_id = %correlation_id,
        run_id = %run_id,
        tournaments = outcome.tournaments.len(),
        failures = outcome.failures.len(),
        diagnostics = config.diagnostics.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Palmares run completed"
    );

    json_response(PalmaresResponse {
        run_id,
        generated_at: Utc::now(),
        tournaments: outcome.tournaments,
        failures: outcome.failures,
        diagnostics: config.diagnostics,
        text,
    })
}

/// Handler for POST /assign.
///
/// Runs the assignment engine on standings supplied in the request. No page
/// is fetched, so a configuration without sources is accepted.
async fn assign_handler(
    State(state): State<AppState>,
    payload: Result<Json<AssignRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing assign request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.parser().parse_lenient(&request.config);
    let awards = assign_rewards(&request.players, &config.rules);

    info!(
        correlation_id = %correlation_id,
        players = request.players.len(),
        rules = config.rules.len(),
        awards = awards.len(),
        "Assignment completed"
    );

    json_response(AssignResponse {
        awards,
        diagnostics: config.diagnostics,
    })
}

fn json_response<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
