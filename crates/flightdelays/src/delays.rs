//! Delay-rate aggregation.
//!
//! Turns the raw grouped counts from [`FlightData`] into percent-delayed
//! statistics keyed by airline, hour of day, or route. Aggregates are
//! recomputed from the store on every call.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};
use rusqlite::types::Value;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::Route;
use crate::storage::{FlightData, GroupCounts};

/// Delay statistics for one group of flights.
///
/// A `DelayStat` always covers at least one flight; the constructor refuses
/// empty groups so the percentage is always defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayStat<K> {
    key: K,
    total_flights: u64,
    delayed_flights: u64,
}

impl<K> DelayStat<K> {
    /// Build a statistic, or `None` if the group is empty or inconsistent.
    #[must_use]
    pub fn new(key: K, total_flights: u64, delayed_flights: u64) -> Option<Self> {
        if total_flights == 0 || delayed_flights > total_flights {
            return None;
        }
        Some(Self {
            key,
            total_flights,
            delayed_flights,
        })
    }

    /// Grouping key.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Number of flights in the group (never zero).
    #[must_use]
    pub fn total_flights(&self) -> u64 {
        self.total_flights
    }

    /// Number of delayed flights in the group.
    #[must_use]
    pub fn delayed_flights(&self) -> u64 {
        self.delayed_flights
    }

    /// `delayed / total × 100`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_delayed(&self) -> f64 {
        self.delayed_flights as f64 / self.total_flights as f64 * 100.0
    }
}

fn collect_stats<K>(counts: Vec<GroupCounts<K>>) -> Vec<DelayStat<K>> {
    counts
        .into_iter()
        .filter_map(|c| {
            let (total, delayed) = (c.total_flights, c.delayed_flights);
            let stat = DelayStat::new(c.key, total, delayed);
            if stat.is_none() {
                warn!(total, delayed, "dropping group without a defined delay rate");
            }
            stat
        })
        .collect()
}

/// Percent delayed per airline display name, in query order (by name).
#[must_use]
pub fn delays_by_airline(store: &FlightData) -> Vec<DelayStat<String>> {
    collect_stats(store.airline_counts())
}

/// Percent delayed per hour of scheduled departure, ascending by hour.
///
/// Departures whose hour cannot be derived are left out.
#[must_use]
pub fn delays_by_hour(store: &FlightData) -> Vec<DelayStat<u8>> {
    let mut by_hour: BTreeMap<u8, (u64, u64)> = BTreeMap::new();

    for counts in store.departure_counts() {
        let Some(hour) = departure_hour(&counts.key) else {
            debug!(
                value = ?counts.key,
                flights = counts.total_flights,
                "skipping scheduled departure without an hour"
            );
            continue;
        };
        let entry = by_hour.entry(hour).or_default();
        entry.0 += counts.total_flights;
        entry.1 += counts.delayed_flights;
    }

    collect_stats(
        by_hour
            .into_iter()
            .map(|(hour, (total_flights, delayed_flights))| GroupCounts {
                key: hour,
                total_flights,
                delayed_flights,
            })
            .collect(),
    )
}

/// Percent delayed per (origin, destination) pair, ordered by route.
#[must_use]
pub fn delays_by_route(store: &FlightData) -> Vec<DelayStat<Route>> {
    collect_stats(store.route_counts())
}

/// Route statistics pivoted into an origin × destination grid.
#[must_use]
pub fn route_matrix(store: &FlightData) -> RouteMatrix {
    RouteMatrix::from_stats(&delays_by_route(store))
}

/// Derive the hour of day (0–23) from a stored scheduled departure.
///
/// Integers are read as `HHMM`. Text is tried as a clock time, then as a
/// datetime, then as digits-only `HHMM`, and finally by reading the first
/// two characters as the hour.
#[must_use]
pub fn departure_hour(value: &Value) -> Option<u8> {
    match value {
        Value::Integer(hhmm) => hour_from_hhmm(*hhmm),
        Value::Real(hhmm) if hhmm.is_finite() => {
            #[allow(clippy::cast_possible_truncation)]
            let hhmm = hhmm.trunc() as i64;
            hour_from_hhmm(hhmm)
        }
        Value::Text(text) => hour_from_text(text.trim()),
        _ => None,
    }
}

fn hour_from_hhmm(hhmm: i64) -> Option<u8> {
    if !(0..2400).contains(&hhmm) {
        return None;
    }
    u8::try_from(hhmm / 100).ok()
}

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse text as a clock time or datetime. Offsets are ignored: the hour is
/// the one written in the value.
fn parse_time(text: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.time())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .or_else(|| {
                    OFFSET_DATETIME_FORMATS
                        .iter()
                        .find_map(|format| DateTime::parse_from_str(text, format).ok())
                })
                .map(|dt| dt.naive_local().time())
        })
}

fn hour_from_text(text: &str) -> Option<u8> {
    if let Some(time) = parse_time(text) {
        return u8::try_from(time.hour()).ok();
    }

    if !text.is_empty() && text.len() <= 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return hour_from_hhmm(text.parse().ok()?);
    }

    // A third digit or a dash means a year or longer number, never an hour.
    if text
        .as_bytes()
        .get(2)
        .is_some_and(|b| b.is_ascii_digit() || *b == b'-')
    {
        return None;
    }

    // Compatibility fallback: leading two characters are the hour.
    text.get(..2)?
        .parse::<u8>()
        .ok()
        .filter(|hour| *hour < 24)
}

/// Percent delayed for every observed route, laid out for a heatmap.
///
/// Rows are origins and columns destinations, both sorted. A route with no
/// flights has no cell at all rather than a zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMatrix {
    origins: Vec<String>,
    destinations: Vec<String>,
    cells: HashMap<Route, f64>,
}

impl RouteMatrix {
    /// Pivot route statistics into a matrix.
    #[must_use]
    pub fn from_stats(stats: &[DelayStat<Route>]) -> Self {
        let mut origins = BTreeSet::new();
        let mut destinations = BTreeSet::new();
        let mut cells = HashMap::with_capacity(stats.len());

        for stat in stats {
            let route = stat.key();
            origins.insert(route.origin.clone());
            destinations.insert(route.destination.clone());
            cells.insert(route.clone(), stat.percent_delayed());
        }

        Self {
            origins: origins.into_iter().collect(),
            destinations: destinations.into_iter().collect(),
            cells,
        }
    }

    /// Row labels.
    #[must_use]
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    /// Column labels.
    #[must_use]
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    /// Percent delayed for a route, or `None` if it was never flown.
    #[must_use]
    pub fn get(&self, origin: &str, destination: &str) -> Option<f64> {
        self.cells.get(&Route::new(origin, destination)).copied()
    }

    /// Number of populated cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no route has any flights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// JSON shape of an airline statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirlineDelay {
    /// Airline display name.
    pub airline: String,
    /// Percent of flights delayed.
    pub percent_delayed: f64,
}

impl From<&DelayStat<String>> for AirlineDelay {
    fn from(stat: &DelayStat<String>) -> Self {
        Self {
            airline: stat.key().clone(),
            percent_delayed: stat.percent_delayed(),
        }
    }
}

/// JSON shape of an hour-of-day statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourDelay {
    /// Hour of scheduled departure, 0–23.
    pub hour: u8,
    /// Percent of flights delayed.
    pub percent_delayed: f64,
}

impl From<&DelayStat<u8>> for HourDelay {
    fn from(stat: &DelayStat<u8>) -> Self {
        Self {
            hour: *stat.key(),
            percent_delayed: stat.percent_delayed(),
        }
    }
}

/// JSON shape of a route statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDelay {
    /// Origin airport code.
    pub origin: String,
    /// Destination airport code.
    pub destination: String,
    /// Percent of flights delayed.
    pub percent_delayed: f64,
}

impl From<&DelayStat<Route>> for RouteDelay {
    fn from(stat: &DelayStat<Route>) -> Self {
        Self {
            origin: stat.key().origin.clone(),
            destination: stat.key().destination.clone(),
            percent_delayed: stat.percent_delayed(),
        }
    }
}
