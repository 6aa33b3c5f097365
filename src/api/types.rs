//! API request and response types

use crate::flights::{Airport, FlightSearchRequest};
use crate::intake::{FieldId, TripIntakeState};
use serde::{Deserialize, Serialize};

// ============================================================================
// Chat
// ============================================================================

/// Request to send one chat turn
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Omitted on the first turn; the response carries the assigned id
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response for one chat turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub state: TripIntakeState,
    pub missing_fields: Vec<FieldId>,
    /// Empty exactly when `complete` is true
    pub next_prompt: String,
    pub complete: bool,
    /// Present from the turn the intake completes onward
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_parameters: Option<FlightSearchRequest>,
}

// ============================================================================
// Sessions
// ============================================================================

/// Snapshot of a session's intake progress
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub state: TripIntakeState,
    pub missing_fields: Vec<FieldId>,
    pub complete: bool,
}

// ============================================================================
// Flights
// ============================================================================

/// Response for airport directory lookups
#[derive(Debug, Serialize)]
pub struct AirportsResponse {
    pub airports: Vec<Airport>,
}

// ============================================================================
// Misc
// ============================================================================

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
