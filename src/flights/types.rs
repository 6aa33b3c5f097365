//! Flight search domain types

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Budget tier in the flight-search vocabulary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    #[default]
    Medium,
    High,
}

/// Round-trip search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSearchRequest {
    /// Origin IATA code or free-text city
    pub origin: String,
    /// Destination IATA code or free-text city
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    #[serde(default = "default_travelers")]
    pub num_travelers: u32,
    #[serde(default)]
    pub budget: BudgetTier,
    #[serde(default)]
    pub accessibility_required: bool,
}

fn default_travelers() -> u32 {
    1
}

impl FlightSearchRequest {
    /// Catch obviously invalid parameters before they reach a provider
    pub fn validate(&self) -> Result<(), String> {
        if self.origin.trim().is_empty() {
            return Err("Origin must not be empty".to_string());
        }
        if self.destination.trim().is_empty() {
            return Err("Destination must not be empty".to_string());
        }
        if self.return_date < self.departure_date {
            return Err("Return date precedes departure date".to_string());
        }
        if self.num_travelers == 0 {
            return Err("Traveler count must be positive".to_string());
        }
        Ok(())
    }
}

/// A single bookable flight option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOffer {
    pub flight_id: String,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub duration_minutes: u32,
    pub price: f64,
    pub currency: String,
    /// 0-10, higher means better equipped for accessible travel
    pub accessibility_score: f32,
    pub accessibility_features: Vec<String>,
    pub is_direct: bool,
    pub stops: u32,
    pub aircraft_type: Option<String>,
}

/// Ranked search result
#[derive(Debug, Clone, Serialize)]
pub struct FlightSearchResponse {
    pub search_id: String,
    pub offers: Vec<FlightOffer>,
    /// Offers found before ranking truncation
    pub total_results: usize,
    pub search_summary: SearchSummary,
}

/// Echo of the parameters a search ran with
#[derive(Debug, Clone, Serialize)]
pub struct SearchSummary {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub num_travelers: u32,
    pub budget: BudgetTier,
    pub accessibility_required: bool,
}
