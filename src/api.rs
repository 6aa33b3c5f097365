//! HTTP API for the trip intake backend

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::flights::FlightSearchService;
use crate::intake::IntakeTracker;
use crate::planner::TripPlanner;
use crate::session::{InMemorySessionStore, SessionStore};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub tracker: Arc<IntakeTracker>,
    pub flights: Arc<FlightSearchService>,
    pub planner: Arc<TripPlanner>,
}

impl AppState {
    pub fn new(tracker: IntakeTracker, flights: FlightSearchService) -> Self {
        Self {
            store: Arc::new(InMemorySessionStore::new()),
            tracker: Arc::new(tracker),
            flights: Arc::new(flights),
            planner: Arc::new(TripPlanner::new()),
        }
    }
}
