//! Trip intake state types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Field Value Types - Strongly typed values for the enumerated fields
// ============================================================================

/// Budget bracket for the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Budget {
    Economy,
    MidRange,
    Luxury,
}

impl Budget {
    pub fn as_str(self) -> &'static str {
        match self {
            Budget::Economy => "economy",
            Budget::MidRange => "mid-range",
            Budget::Luxury => "luxury",
        }
    }

    /// Case-insensitive parse of the wire value
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "economy" => Some(Budget::Economy),
            "mid-range" => Some(Budget::MidRange),
            "luxury" => Some(Budget::Luxury),
            _ => None,
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How densely packed the itinerary should be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripPace {
    Relaxed,
    Moderate,
    Busy,
}

impl TripPace {
    pub fn as_str(self) -> &'static str {
        match self {
            TripPace::Relaxed => "relaxed",
            TripPace::Moderate => "moderate",
            TripPace::Busy => "busy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "relaxed" => Some(TripPace::Relaxed),
            "moderate" => Some(TripPace::Moderate),
            "busy" => Some(TripPace::Busy),
            _ => None,
        }
    }
}

impl fmt::Display for TripPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of trip being planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Leisure,
    Business,
    Adventure,
    Cultural,
    Family,
    Romantic,
}

impl TripType {
    pub fn as_str(self) -> &'static str {
        match self {
            TripType::Leisure => "leisure",
            TripType::Business => "business",
            TripType::Adventure => "adventure",
            TripType::Cultural => "cultural",
            TripType::Family => "family",
            TripType::Romantic => "romantic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "leisure" => Some(TripType::Leisure),
            "business" => Some(TripType::Business),
            "adventure" => Some(TripType::Adventure),
            "cultural" => Some(TripType::Cultural),
            "family" => Some(TripType::Family),
            "romantic" => Some(TripType::Romantic),
            _ => None,
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Travel date pair; each half may arrive in a different turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelDates {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TravelDates {
    pub fn is_complete(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// Inclusive stay length in days, when both dates are known
    pub fn length_of_stay_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }
}

// ============================================================================
// Field Identity
// ============================================================================

/// Identity of a required intake field.
///
/// Variant order is the fixed priority order used for missing-field
/// reporting and follow-up questions: logistics first, then trip shape,
/// then preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Destination,
    DatesOfTravel,
    StartingLocation,
    TripType,
    NumberOfTravelers,
    Interests,
    Budget,
    AccessibilityNeeds,
    DietaryNeeds,
    AgeGroupOfTravelers,
    HowPackedTrip,
    OkWithWalking,
}

impl FieldId {
    /// All required fields in priority order
    pub const PRIORITY: [FieldId; 12] = [
        FieldId::Destination,
        FieldId::DatesOfTravel,
        FieldId::StartingLocation,
        FieldId::TripType,
        FieldId::NumberOfTravelers,
        FieldId::Interests,
        FieldId::Budget,
        FieldId::AccessibilityNeeds,
        FieldId::DietaryNeeds,
        FieldId::AgeGroupOfTravelers,
        FieldId::HowPackedTrip,
        FieldId::OkWithWalking,
    ];

    /// The field's JSON key
    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Destination => "destination",
            FieldId::DatesOfTravel => "dates_of_travel",
            FieldId::StartingLocation => "starting_location",
            FieldId::TripType => "trip_type",
            FieldId::NumberOfTravelers => "number_of_travelers",
            FieldId::Interests => "interests",
            FieldId::Budget => "budget",
            FieldId::AccessibilityNeeds => "accessibility_needs",
            FieldId::DietaryNeeds => "dietary_needs",
            FieldId::AgeGroupOfTravelers => "age_group_of_travelers",
            FieldId::HowPackedTrip => "how_packed_trip",
            FieldId::OkWithWalking => "ok_with_walking",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Intake State
// ============================================================================

/// The accumulated record of trip-planning facts.
///
/// Every field is optional until the user supplies it. For the free-text
/// preference fields (`accessibility_needs`, `dietary_needs`,
/// `age_group_of_travelers`) an empty string is a valid, explicit "none".
/// The location fields never hold blank strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripIntakeState {
    pub budget: Option<Budget>,
    pub starting_location: Option<String>,
    pub destination: Option<String>,
    pub accessibility_needs: Option<String>,
    pub dietary_needs: Option<String>,
    pub age_group_of_travelers: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub how_packed_trip: Option<TripPace>,
    pub ok_with_walking: Option<bool>,
    #[serde(default)]
    pub dates_of_travel: TravelDates,
    pub trip_type: Option<TripType>,
    pub number_of_travelers: Option<u32>,
}

impl TripIntakeState {
    pub(crate) fn is_set(&self, field: FieldId) -> bool {
        match field {
            FieldId::Budget => self.budget.is_some(),
            FieldId::StartingLocation => self.starting_location.is_some(),
            FieldId::Destination => self.destination.is_some(),
            FieldId::AccessibilityNeeds => self.accessibility_needs.is_some(),
            FieldId::DietaryNeeds => self.dietary_needs.is_some(),
            FieldId::AgeGroupOfTravelers => self.age_group_of_travelers.is_some(),
            FieldId::Interests => !self.interests.is_empty(),
            FieldId::HowPackedTrip => self.how_packed_trip.is_some(),
            FieldId::OkWithWalking => self.ok_with_walking.is_some(),
            FieldId::DatesOfTravel => self.dates_of_travel.is_complete(),
            FieldId::TripType => self.trip_type.is_some(),
            FieldId::NumberOfTravelers => self.number_of_travelers.is_some(),
        }
    }

    /// Required fields still unset, in priority order
    pub fn missing_fields(&self) -> Vec<FieldId> {
        FieldId::PRIORITY
            .iter()
            .copied()
            .filter(|field| !self.is_set(*field))
            .collect()
    }

    /// Local completion predicate; authoritative over any oracle claim
    pub fn is_complete(&self) -> bool {
        FieldId::PRIORITY.iter().all(|field| self.is_set(*field))
    }
}

/// Intake dialogue phase. `Complete` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakePhase {
    #[default]
    Collecting,
    Complete,
}
