//! Core record types for flightdelays.
//!
//! These mirror the rows of the read-only flights dataset. Nothing here is
//! ever written back to the store.

use serde::{Deserialize, Serialize};

/// Departure delays strictly above this many minutes count as delayed.
pub const DELAY_THRESHOLD_MINUTES: i64 = 20;

/// Returns whether a departure delay counts as delayed.
///
/// A missing delay (cancelled or diverted flight) is never delayed.
#[must_use]
pub fn is_delayed(departure_delay: Option<i64>) -> bool {
    departure_delay.is_some_and(|delay| delay > DELAY_THRESHOLD_MINUTES)
}

/// A flight joined with the display name of its airline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Flight identifier.
    pub id: i64,

    /// Scheduled departure as stored, normalized to text (`HHMM` for
    /// integer-typed values).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_departure: Option<String>,

    /// Departure delay in minutes; negative means early.
    pub departure_delay: Option<i64>,

    /// Day of month.
    pub day: u32,
    /// Month of year.
    pub month: u32,
    /// Year.
    pub year: i32,

    /// Origin airport IATA code.
    pub origin_airport: String,
    /// Destination airport IATA code.
    pub destination_airport: String,

    /// Airline identifier.
    pub airline_id: i64,
    /// Airline display name.
    pub airline: String,
}

impl FlightRecord {
    /// Whether this flight departed more than the threshold late.
    #[must_use]
    pub fn is_delayed(&self) -> bool {
        is_delayed(self.departure_delay)
    }

    /// One-line human readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let base = format!(
            "{}. {} -> {} by {}",
            self.id, self.origin_airport, self.destination_airport, self.airline
        );
        match self.departure_delay {
            Some(delay) if delay > 0 => format!("{base}, Delay: {delay} Minutes"),
            _ => base,
        }
    }
}

/// An ordered (origin, destination) airport pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Route {
    /// Origin airport IATA code.
    pub origin: String,
    /// Destination airport IATA code.
    pub destination: String,
}

impl Route {
    /// Create a route between two airport codes.
    #[must_use]
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.origin, self.destination)
    }
}

/// Geographic position of an airport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}
