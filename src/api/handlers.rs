//! HTTP request handlers

use super::types::{
    AirportsResponse, ChatRequest, ChatResponse, ErrorResponse, HealthResponse, SessionResponse,
};
use super::AppState;
use crate::flights::{search_airports, FlightSearchRequest, FlightSearchResponse};
use crate::intake::IntakePhase;
use crate::places::{build_places_query, PlacesQuery};
use crate::session::Session;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio_util::sync::CancellationToken;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness probe
        .route("/health", get(health))
        // Conversational intake
        .route("/api/v1/chat", post(chat))
        // Session inspection
        .route("/api/v1/sessions/:id", get(get_session))
        .route("/api/v1/sessions/:id/places", get(get_places_query))
        // Flight search
        .route("/api/v1/flights/search", post(search_flights))
        .route("/api/v1/flights/from-session/:id", get(search_from_session))
        .route("/api/v1/flights/airports/:query", get(airports))
        .with_state(state)
}

// ============================================================
// Health
// ============================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

// ============================================================
// Chat
// ============================================================

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim().to_string();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message must not be empty".to_string()));
    }

    let mut session = match request.session_id.as_deref() {
        Some(id) => state.store.get(id).await.unwrap_or_default(),
        None => Session::new(),
    };

    // A completed intake is terminal: echo the final state, no oracle turn
    if session.phase == IntakePhase::Complete {
        let final_state = session.state.clone();
        let session_id = state.store.put(session, request.session_id.as_deref()).await;
        let flight_parameters = state.planner.flight_parameters(&session_id).await;
        return Ok(Json(ChatResponse {
            session_id,
            state: final_state,
            missing_fields: Vec::new(),
            next_prompt: String::new(),
            complete: true,
            flight_parameters,
        }));
    }

    let cancel = CancellationToken::new();
    let outcome = state
        .tracker
        .advance_state(&session.state, &message, &session.history, &cancel)
        .await;

    session.state = outcome.state.clone();
    session.push_turn(&message);
    if outcome.complete {
        session.phase = IntakePhase::Complete;
    }

    let session_id = state.store.put(session, request.session_id.as_deref()).await;

    let flight_parameters = if outcome.complete {
        state
            .planner
            .process_completed(&session_id, &outcome.state)
            .await
    } else {
        None
    };

    Ok(Json(ChatResponse {
        session_id,
        state: outcome.state,
        missing_fields: outcome.missing_fields,
        next_prompt: outcome.next_prompt,
        complete: outcome.complete,
        flight_parameters,
    }))
}

// ============================================================
// Sessions
// ============================================================

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Unknown session: {id}")))?;

    let missing_fields = session.state.missing_fields();
    let complete = missing_fields.is_empty();

    Ok(Json(SessionResponse {
        session_id: id,
        state: session.state,
        missing_fields,
        complete,
    }))
}

async fn get_places_query(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlacesQuery>, AppError> {
    let session = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Unknown session: {id}")))?;

    Ok(Json(build_places_query(&session.state)))
}

// ============================================================
// Flights
// ============================================================

async fn search_flights(
    State(state): State<AppState>,
    Json(request): Json<FlightSearchRequest>,
) -> Result<Json<FlightSearchResponse>, AppError> {
    request.validate().map_err(AppError::BadRequest)?;

    Ok(Json(state.flights.search(&request).await))
}

async fn search_from_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FlightSearchResponse>, AppError> {
    let session = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Unknown session: {id}")))?;

    let params = state
        .planner
        .ensure_parameters(&id, &session.state)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(state.flights.search(&params).await))
}

async fn airports(Path(query): Path<String>) -> Json<AirportsResponse> {
    Json(AirportsResponse {
        airports: search_airports(&query),
    })
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
