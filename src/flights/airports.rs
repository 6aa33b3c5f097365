//! Static airport directory
//!
//! A small built-in table covering the busiest US airports. Lookups that
//! miss it fall through to whatever text the caller supplied.

use serde::Serialize;

/// Airport directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
}

const AIRPORTS: &[Airport] = &[
    Airport {
        code: "JFK",
        name: "John F. Kennedy International Airport",
        city: "New York",
    },
    Airport {
        code: "LAX",
        name: "Los Angeles International Airport",
        city: "Los Angeles",
    },
    Airport {
        code: "ORD",
        name: "O'Hare International Airport",
        city: "Chicago",
    },
    Airport {
        code: "ATL",
        name: "Hartsfield-Jackson Atlanta International Airport",
        city: "Atlanta",
    },
    Airport {
        code: "DFW",
        name: "Dallas/Fort Worth International Airport",
        city: "Dallas",
    },
    Airport {
        code: "DEN",
        name: "Denver International Airport",
        city: "Denver",
    },
    Airport {
        code: "SFO",
        name: "San Francisco International Airport",
        city: "San Francisco",
    },
    Airport {
        code: "LAS",
        name: "Harry Reid International Airport",
        city: "Las Vegas",
    },
    Airport {
        code: "MCO",
        name: "Orlando International Airport",
        city: "Orlando",
    },
    Airport {
        code: "CLT",
        name: "Charlotte Douglas International Airport",
        city: "Charlotte",
    },
];

/// Case-insensitive substring match against IATA codes and airport names
pub fn search_airports(query: &str) -> Vec<Airport> {
    let code_query = query.trim().to_uppercase();
    let name_query = query.trim().to_lowercase();
    if code_query.is_empty() {
        return Vec::new();
    }
    AIRPORTS
        .iter()
        .filter(|airport| {
            airport.code.contains(&code_query)
                || airport.name.to_lowercase().contains(&name_query)
        })
        .copied()
        .collect()
}

/// Resolve free-text city input to its airport, if the directory covers it
pub fn find_by_city(city: &str) -> Option<Airport> {
    let city = city.trim().to_lowercase();
    if city.is_empty() {
        return None;
    }
    AIRPORTS
        .iter()
        .find(|airport| city.contains(&airport.city.to_lowercase()))
        .copied()
}
