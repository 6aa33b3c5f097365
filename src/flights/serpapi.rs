//! `SerpAPI` Google Flights provider

use super::types::{FlightOffer, FlightSearchRequest};
use super::{FlightError, FlightProvider};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const SEARCH_URL: &str = "https://serpapi.com/search";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct SerpApiProvider {
    client: Client,
    api_key: String,
}

impl SerpApiProvider {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_key }
    }

    /// An itinerary group becomes one offer: first leg's departure, last
    /// leg's arrival, intermediate legs counted as stops.
    fn normalize(data: SerpApiResponse, request: &FlightSearchRequest) -> Vec<FlightOffer> {
        let mut offers = Vec::new();
        for group in data.best_flights.into_iter().chain(data.other_flights) {
            match Self::group_to_offer(&group, request) {
                Ok(offer) => offers.push(offer),
                Err(reason) => {
                    tracing::warn!(reason = %reason, "Skipping malformed flight entry");
                }
            }
        }
        offers
    }

    fn group_to_offer(
        group: &FlightGroup,
        request: &FlightSearchRequest,
    ) -> Result<FlightOffer, String> {
        let first = group.flights.first().ok_or("group has no legs")?;
        let last = group.flights.last().ok_or("group has no legs")?;

        let departure = first
            .departure_airport
            .as_ref()
            .ok_or("missing departure airport")?;
        let arrival = last
            .arrival_airport
            .as_ref()
            .ok_or("missing arrival airport")?;

        let departure_time = parse_time(departure.time.as_deref())?;
        let arrival_time = parse_time(arrival.time.as_deref())?;

        let stops = u32::try_from(group.flights.len().saturating_sub(1)).unwrap_or(u32::MAX);
        let is_direct = stops == 0;

        let mut score = if is_direct { 7.0_f32 } else { 5.0 };
        if request.accessibility_required {
            score += 2.0;
        }

        let duration_minutes = group
            .total_duration
            .unwrap_or_else(|| group.flights.iter().filter_map(|leg| leg.duration).sum());

        Ok(FlightOffer {
            flight_id: first.flight_number.clone().unwrap_or_default(),
            airline: first
                .airline
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            flight_number: first.flight_number.clone().unwrap_or_default(),
            origin: departure
                .id
                .clone()
                .unwrap_or_else(|| request.origin.clone()),
            destination: arrival
                .id
                .clone()
                .unwrap_or_else(|| request.destination.clone()),
            departure_time,
            arrival_time,
            duration_minutes,
            price: group.price.unwrap_or(0.0),
            currency: "USD".to_string(),
            accessibility_score: score.min(10.0),
            accessibility_features: if is_direct {
                vec!["Direct flight".to_string()]
            } else {
                Vec::new()
            },
            is_direct,
            stops,
            aircraft_type: first.airplane.clone(),
        })
    }
}

#[async_trait]
impl FlightProvider for SerpApiProvider {
    async fn search(
        &self,
        request: &FlightSearchRequest,
    ) -> Result<Vec<FlightOffer>, FlightError> {
        let params: &[(&str, String)] = &[
            ("api_key", self.api_key.clone()),
            ("engine", "google_flights".to_string()),
            ("hl", "en".to_string()),
            ("gl", "us".to_string()),
            ("currency", "USD".to_string()),
            ("departure_id", request.origin.clone()),
            ("arrival_id", request.destination.clone()),
            (
                "outbound_date",
                request.departure_date.format("%Y-%m-%d").to_string(),
            ),
            (
                "return_date",
                request.return_date.format("%Y-%m-%d").to_string(),
            ),
            ("adults", request.num_travelers.to_string()),
            // Round trip
            ("type", "1".to_string()),
        ];

        let response = self
            .client
            .get(SEARCH_URL)
            .query(params)
            .send()
            .await
            .map_err(|e| FlightError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FlightError::Request(format!("HTTP {status}: {body}")));
        }

        let data: SerpApiResponse = response
            .json()
            .await
            .map_err(|e| FlightError::Malformed(e.to_string()))?;

        Ok(Self::normalize(data, request))
    }
}

fn parse_time(value: Option<&str>) -> Result<NaiveDateTime, String> {
    let text = value.ok_or("missing time")?;
    NaiveDateTime::parse_from_str(text, TIME_FORMAT)
        .map_err(|_| format!("unparseable time: {text}"))
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    best_flights: Vec<FlightGroup>,
    #[serde(default)]
    other_flights: Vec<FlightGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct FlightGroup {
    #[serde(default)]
    flights: Vec<FlightLeg>,
    price: Option<f64>,
    total_duration: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct FlightLeg {
    departure_airport: Option<EndpointAirport>,
    arrival_airport: Option<EndpointAirport>,
    duration: Option<u32>,
    airline: Option<String>,
    flight_number: Option<String>,
    airplane: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EndpointAirport {
    id: Option<String>,
    time: Option<String>,
}
