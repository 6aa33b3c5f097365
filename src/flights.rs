//! Flight search
//!
//! Ranked flight offers for a completed intake. An external provider is
//! used when configured; mock offers cover the unconfigured case and every
//! provider failure, so a search always returns something rankable.

mod airports;
mod mock;
mod search;
mod serpapi;
mod types;

pub use airports::{find_by_city, search_airports, Airport};
pub use search::FlightSearchService;
pub use types::{
    BudgetTier, FlightOffer, FlightSearchRequest, FlightSearchResponse, SearchSummary,
};

use async_trait::async_trait;
use thiserror::Error;

/// External source of flight offers
#[async_trait]
pub trait FlightProvider: Send + Sync {
    async fn search(&self, request: &FlightSearchRequest)
        -> Result<Vec<FlightOffer>, FlightError>;
}

/// Errors from an external flight provider
#[derive(Debug, Error)]
pub enum FlightError {
    #[error("provider request failed: {0}")]
    Request(String),
    #[error("provider returned malformed data: {0}")]
    Malformed(String),
}
