//! Flight search orchestration
//!
//! Search never fails from the caller's point of view: a missing provider,
//! a provider error, and an empty provider result all fall back to mock
//! offers, which then go through the same ranking.

use super::mock::mock_flights;
use super::serpapi::SerpApiProvider;
use super::types::{FlightOffer, FlightSearchRequest, FlightSearchResponse, SearchSummary};
use super::FlightProvider;
use std::sync::Arc;

/// Offers kept after ranking
const TOP_OFFERS: usize = 3;

/// Flight search with provider fallback and accessibility-first ranking
pub struct FlightSearchService {
    provider: Option<Arc<dyn FlightProvider>>,
}

impl FlightSearchService {
    pub fn new(provider: Option<Arc<dyn FlightProvider>>) -> Self {
        Self { provider }
    }

    /// Provider selection from the environment: `SERPAPI_KEY` enables the
    /// external provider, `FASTTRIP_MOCK_FLIGHTS=1` forces mock data.
    pub fn from_env() -> Self {
        let force_mock =
            std::env::var("FASTTRIP_MOCK_FLIGHTS").is_ok_and(|value| value == "1");
        let api_key = std::env::var("SERPAPI_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let provider: Option<Arc<dyn FlightProvider>> = match api_key {
            Some(key) if !force_mock => Some(Arc::new(SerpApiProvider::new(key))),
            _ => None,
        };

        if provider.is_none() {
            tracing::info!("Flight search running on mock data");
        }

        Self::new(provider)
    }

    pub async fn search(&self, request: &FlightSearchRequest) -> FlightSearchResponse {
        let offers = match &self.provider {
            Some(provider) => match provider.search(request).await {
                Ok(offers) if !offers.is_empty() => offers,
                Ok(_) => {
                    tracing::warn!("Provider returned no flights; using mock data");
                    mock_flights(request)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Provider search failed; using mock data");
                    mock_flights(request)
                }
            },
            None => mock_flights(request),
        };

        Self::rank(offers, request)
    }

    /// Accessibility score descending, then price ascending, top offers only
    fn rank(mut offers: Vec<FlightOffer>, request: &FlightSearchRequest) -> FlightSearchResponse {
        offers.sort_by(|a, b| {
            b.accessibility_score
                .total_cmp(&a.accessibility_score)
                .then_with(|| a.price.total_cmp(&b.price))
        });

        let total_results = offers.len();
        offers.truncate(TOP_OFFERS);

        FlightSearchResponse {
            search_id: uuid::Uuid::new_v4().to_string(),
            offers,
            total_results,
            search_summary: SearchSummary {
                origin: request.origin.clone(),
                destination: request.destination.clone(),
                departure_date: request.departure_date,
                num_travelers: request.num_travelers,
                budget: request.budget,
                accessibility_required: request.accessibility_required,
            },
        }
    }
}
