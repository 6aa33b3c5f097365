//! Conversation state tracker
//!
//! Accumulates structured trip-planning facts from free-text chat turns.
//! The extraction oracle is treated as untrusted: every candidate update is
//! re-validated field by field, and completion is decided locally, never by
//! the oracle's own claim.

mod prompt;
mod state;
mod tracker;
mod validate;

#[cfg(test)]
mod proptests;

pub use prompt::HISTORY_WINDOW;
pub use state::{
    Budget, FieldId, IntakePhase, TravelDates, TripIntakeState, TripPace, TripType,
};
pub use tracker::{IntakeTracker, TurnOutcome};
