//! Downstream trip planning
//!
//! Once an intake completes, its free-text answers are folded into typed
//! flight search parameters and cached per session. Extraction never blocks
//! the chat flow; failures are logged and surface later as an explicit
//! error when flight search is actually requested.

use crate::flights::{find_by_city, BudgetTier, FlightSearchRequest};
use crate::intake::{Budget, TripIntakeState};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Why flight parameters could not be derived from an intake state
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("intake is not complete")]
    Incomplete,
}

/// Derive flight search parameters from a completed intake state
pub fn extract_flight_parameters(
    state: &TripIntakeState,
) -> Result<FlightSearchRequest, ExtractError> {
    if !state.is_complete() {
        return Err(ExtractError::Incomplete);
    }
    let (Some(departure_date), Some(return_date)) = (
        state.dates_of_travel.start_date,
        state.dates_of_travel.end_date,
    ) else {
        return Err(ExtractError::Incomplete);
    };

    let origin = state.starting_location.clone().unwrap_or_default();
    let destination = state.destination.clone().unwrap_or_default();

    Ok(FlightSearchRequest {
        origin: resolve_airport_code(&origin),
        destination: resolve_airport_code(&destination),
        departure_date,
        return_date,
        num_travelers: state.number_of_travelers.unwrap_or(1),
        budget: state.budget.map_or(BudgetTier::Medium, budget_tier),
        accessibility_required: has_accessibility_requirements(state),
    })
}

fn budget_tier(budget: Budget) -> BudgetTier {
    match budget {
        Budget::Economy => BudgetTier::Low,
        Budget::MidRange => BudgetTier::Medium,
        Budget::Luxury => BudgetTier::High,
    }
}

/// Resolve free-text city input to an IATA code where the directory allows.
/// Three-letter tokens pass through uppercased; anything else goes as-is
/// and is left to the provider to interpret.
fn resolve_airport_code(city: &str) -> String {
    if let Some(airport) = find_by_city(city) {
        return airport.code.to_string();
    }
    let trimmed = city.trim();
    if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return trimmed.to_uppercase();
    }
    trimmed.to_string()
}

/// An explicit "none" answer does not flag the search as accessible
fn has_accessibility_requirements(state: &TripIntakeState) -> bool {
    state.accessibility_needs.as_ref().is_some_and(|needs| {
        let needs = needs.trim();
        !needs.is_empty() && !needs.eq_ignore_ascii_case("none")
    })
}

/// Per-session cache of extracted flight parameters
#[derive(Default)]
pub struct TripPlanner {
    cache: RwLock<HashMap<String, FlightSearchRequest>>,
}

impl TripPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract and cache parameters at the turn an intake completes.
    /// Failures are logged, never propagated into the chat response.
    pub async fn process_completed(
        &self,
        session_id: &str,
        state: &TripIntakeState,
    ) -> Option<FlightSearchRequest> {
        match extract_flight_parameters(state) {
            Ok(params) => {
                tracing::info!(
                    session_id = %session_id,
                    origin = %params.origin,
                    destination = %params.destination,
                    "Extracted flight parameters"
                );
                self.cache
                    .write()
                    .await
                    .insert(session_id.to_string(), params.clone());
                Some(params)
            }
            Err(e) => {
                tracing::error!(
                    session_id = %session_id,
                    error = %e,
                    "Failed to extract flight parameters"
                );
                None
            }
        }
    }

    /// Cached parameters, or a fresh extraction for sessions completed
    /// before this process started caring about them
    pub async fn ensure_parameters(
        &self,
        session_id: &str,
        state: &TripIntakeState,
    ) -> Result<FlightSearchRequest, ExtractError> {
        if let Some(params) = self.flight_parameters(session_id).await {
            return Ok(params);
        }
        let params = extract_flight_parameters(state)?;
        self.cache
            .write()
            .await
            .insert(session_id.to_string(), params.clone());
        Ok(params)
    }

    /// Cached parameters for a session
    pub async fn flight_parameters(&self, session_id: &str) -> Option<FlightSearchRequest> {
        self.cache.read().await.get(session_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{TravelDates, TripPace, TripType};
    use chrono::NaiveDate;

    fn complete_state() -> TripIntakeState {
        TripIntakeState {
            budget: Some(Budget::Luxury),
            starting_location: Some("New York".to_string()),
            destination: Some("Los Angeles".to_string()),
            accessibility_needs: Some("wheelchair access".to_string()),
            dietary_needs: Some(String::new()),
            age_group_of_travelers: Some("adults".to_string()),
            interests: vec!["food".to_string()],
            how_packed_trip: Some(TripPace::Relaxed),
            ok_with_walking: Some(true),
            dates_of_travel: TravelDates {
                start_date: NaiveDate::from_ymd_opt(2026, 5, 1),
                end_date: NaiveDate::from_ymd_opt(2026, 5, 8),
            },
            trip_type: Some(TripType::Romantic),
            number_of_travelers: Some(2),
        }
    }

    #[test]
    fn test_extraction_maps_every_parameter() {
        let params = extract_flight_parameters(&complete_state()).expect("params");

        assert_eq!(params.origin, "JFK");
        assert_eq!(params.destination, "LAX");
        assert_eq!(
            params.departure_date,
            NaiveDate::from_ymd_opt(2026, 5, 1).expect("date")
        );
        assert_eq!(
            params.return_date,
            NaiveDate::from_ymd_opt(2026, 5, 8).expect("date")
        );
        assert_eq!(params.num_travelers, 2);
        assert_eq!(params.budget, BudgetTier::High);
        assert!(params.accessibility_required);
    }

    #[test]
    fn test_incomplete_state_is_rejected() {
        let mut state = complete_state();
        state.destination = None;
        assert_eq!(
            extract_flight_parameters(&state),
            Err(ExtractError::Incomplete)
        );
    }

    #[test]
    fn test_budget_tiers_map_across_vocabularies() {
        let mut state = complete_state();
        state.budget = Some(Budget::Economy);
        assert_eq!(
            extract_flight_parameters(&state).expect("params").budget,
            BudgetTier::Low
        );

        state.budget = Some(Budget::MidRange);
        assert_eq!(
            extract_flight_parameters(&state).expect("params").budget,
            BudgetTier::Medium
        );
    }

    #[test]
    fn test_unknown_city_passes_through() {
        let mut state = complete_state();
        state.destination = Some("Reykjavik".to_string());
        let params = extract_flight_parameters(&state).expect("params");
        assert_eq!(params.destination, "Reykjavik");
    }

    #[test]
    fn test_three_letter_tokens_uppercase_as_codes() {
        let mut state = complete_state();
        state.destination = Some("cdg".to_string());
        let params = extract_flight_parameters(&state).expect("params");
        assert_eq!(params.destination, "CDG");
    }

    #[test]
    fn test_none_accessibility_answers_do_not_flag_search() {
        let mut state = complete_state();

        state.accessibility_needs = Some(String::new());
        assert!(!extract_flight_parameters(&state)
            .expect("params")
            .accessibility_required);

        state.accessibility_needs = Some("None".to_string());
        assert!(!extract_flight_parameters(&state)
            .expect("params")
            .accessibility_required);
    }

    #[tokio::test]
    async fn test_planner_caches_per_session() {
        let planner = TripPlanner::new();

        assert!(planner.flight_parameters("s1").await.is_none());

        let params = planner
            .process_completed("s1", &complete_state())
            .await
            .expect("params");
        assert_eq!(planner.flight_parameters("s1").await, Some(params));
        assert!(planner.flight_parameters("s2").await.is_none());
    }

    #[tokio::test]
    async fn test_incomplete_state_is_not_cached() {
        let planner = TripPlanner::new();
        let mut state = complete_state();
        state.interests.clear();

        assert!(planner.process_completed("s1", &state).await.is_none());
        assert!(planner.flight_parameters("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_ensure_parameters_extracts_when_uncached() {
        let planner = TripPlanner::new();

        let params = planner
            .ensure_parameters("s1", &complete_state())
            .await
            .expect("params");
        assert_eq!(params.origin, "JFK");
        // Now cached
        assert!(planner.flight_parameters("s1").await.is_some());

        let incomplete = TripIntakeState::default();
        assert_eq!(
            planner.ensure_parameters("s2", &incomplete).await,
            Err(ExtractError::Incomplete)
        );
    }
}
