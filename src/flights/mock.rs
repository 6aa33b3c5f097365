//! Mock flight offer generator
//!
//! Used whenever no provider is configured, or whenever the provider fails.
//! Shapes match real provider output closely enough to exercise ranking.

use super::types::{BudgetTier, FlightOffer, FlightSearchRequest};
use chrono::{Duration, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;

const AIRLINES: &[&str] = &[
    "American Airlines",
    "Delta",
    "United",
    "Southwest",
    "JetBlue",
    "Alaska Airlines",
];

const AIRCRAFT_TYPES: &[&str] = &["B737", "A320", "B787", "A350", "B777"];

const BASE_ASSISTANCE_FEATURES: &[&str] = &[
    "Wheelchair assistance available",
    "Special seating options",
    "Medical equipment support",
    "Service animal friendly",
    "Priority boarding",
];

const EXTRA_ASSISTANCE_FEATURES: &[&str] = &[
    "Accessible boarding ramp",
    "Assistance with carry-on luggage",
    "Accessible lavatory",
    "Oxygen support available",
    "Visual assistance available",
    "Hearing assistance available",
];

/// Generate plausible offers for a search request
pub fn mock_flights(request: &FlightSearchRequest) -> Vec<FlightOffer> {
    let mut rng = rand::thread_rng();
    let num_flights = rng.gen_range(5..=12);

    let morning = NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default();
    let base_departure = request.departure_date.and_time(morning);

    (0..num_flights)
        .map(|i| {
            let departure_time = base_departure + Duration::hours(rng.gen_range(0..=14));
            let duration_hours: u32 = rng.gen_range(1..=8);
            let arrival_time = departure_time + Duration::hours(i64::from(duration_hours));

            let (accessibility_score, accessibility_features) =
                accessibility_profile(request, &mut rng);

            // Roughly 30% of routes fly direct
            let is_direct = rng.gen_bool(0.3);
            let stops = if is_direct { 0 } else { rng.gen_range(1..=2) };

            FlightOffer {
                flight_id: format!("TEST_FLIGHT_{}", i + 1),
                airline: (*AIRLINES.choose(&mut rng).unwrap_or(&"Unknown")).to_string(),
                flight_number: rng.gen_range(100..=9999).to_string(),
                origin: request.origin.clone(),
                destination: request.destination.clone(),
                departure_time,
                arrival_time,
                duration_minutes: duration_hours * 60,
                price: price_for_tier(request.budget, &mut rng),
                currency: "USD".to_string(),
                accessibility_score,
                accessibility_features,
                is_direct,
                stops,
                aircraft_type: AIRCRAFT_TYPES
                    .choose(&mut rng)
                    .map(|aircraft| (*aircraft).to_string()),
            }
        })
        .collect()
}

fn price_for_tier(tier: BudgetTier, rng: &mut impl Rng) -> f64 {
    let price: u32 = match tier {
        BudgetTier::Low => rng.gen_range(150..=350),
        BudgetTier::Medium => rng.gen_range(300..=600),
        BudgetTier::High => rng.gen_range(500..=1200),
    };
    f64::from(price)
}

/// Base score 5.0; accessible searches get the assistance feature set plus
/// a couple of extras, each nudging the score up.
fn accessibility_profile(
    request: &FlightSearchRequest,
    rng: &mut impl Rng,
) -> (f32, Vec<String>) {
    let mut score = 5.0_f32;
    let mut features = Vec::new();

    if request.accessibility_required {
        score += 2.0;
        features.extend(
            BASE_ASSISTANCE_FEATURES
                .iter()
                .map(|feature| (*feature).to_string()),
        );

        let num_extra = rng.gen_range(2..=3);
        for feature in EXTRA_ASSISTANCE_FEATURES.choose_multiple(rng, num_extra) {
            features.push((*feature).to_string());
            score += 0.5;
        }
    }

    (score.clamp(0.0, 10.0), features)
}
