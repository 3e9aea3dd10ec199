//! Data access layer for the flights dataset.
//!
//! [`FlightData`] owns a read-only `SQLite` connection and exposes the
//! parameterized lookups plus the raw grouped counts the aggregation layer
//! builds on. Query failures are logged and reported as empty results, so
//! callers cannot tell "nothing matched" from "the query failed".

pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags, Params, Row};
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::models::{Coordinates, FlightRecord, Route, DELAY_THRESHOLD_MINUTES};

const QUERY_FLIGHT_BY_ID: &str = r"
SELECT flights.ID, flights.SCHEDULED_DEPARTURE, flights.DEPARTURE_DELAY,
       flights.DAY, flights.MONTH, flights.YEAR,
       flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT,
       flights.AIRLINE, airlines.AIRLINE
FROM flights
JOIN airlines ON flights.AIRLINE = airlines.ID
WHERE flights.ID = ?1
";

const QUERY_FLIGHTS_BY_DATE: &str = r"
SELECT flights.ID, flights.SCHEDULED_DEPARTURE, flights.DEPARTURE_DELAY,
       flights.DAY, flights.MONTH, flights.YEAR,
       flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT,
       flights.AIRLINE, airlines.AIRLINE
FROM flights
JOIN airlines ON flights.AIRLINE = airlines.ID
WHERE flights.DAY = ?1 AND flights.MONTH = ?2 AND flights.YEAR = ?3
ORDER BY flights.ID
";

const QUERY_DELAYED_BY_AIRLINE: &str = r"
SELECT flights.ID, flights.SCHEDULED_DEPARTURE, flights.DEPARTURE_DELAY,
       flights.DAY, flights.MONTH, flights.YEAR,
       flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT,
       flights.AIRLINE, airlines.AIRLINE
FROM flights
JOIN airlines ON flights.AIRLINE = airlines.ID
WHERE airlines.AIRLINE LIKE ?1
  AND flights.DEPARTURE_DELAY > ?2
ORDER BY flights.ID
";

const QUERY_DELAYED_BY_AIRPORT: &str = r"
SELECT flights.ID, flights.SCHEDULED_DEPARTURE, flights.DEPARTURE_DELAY,
       flights.DAY, flights.MONTH, flights.YEAR,
       flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT,
       flights.AIRLINE, airlines.AIRLINE
FROM flights
JOIN airlines ON flights.AIRLINE = airlines.ID
WHERE flights.ORIGIN_AIRPORT LIKE ?1
  AND flights.DEPARTURE_DELAY > ?2
ORDER BY flights.ID
";

const QUERY_AIRLINE_COUNTS: &str = r"
SELECT airlines.AIRLINE,
       COUNT(flights.ID),
       SUM(CASE WHEN flights.DEPARTURE_DELAY > ?1 THEN 1 ELSE 0 END)
FROM flights
JOIN airlines ON flights.AIRLINE = airlines.ID
GROUP BY airlines.AIRLINE
ORDER BY airlines.AIRLINE
";

const QUERY_DEPARTURE_COUNTS: &str = r"
SELECT flights.SCHEDULED_DEPARTURE,
       COUNT(flights.ID),
       SUM(CASE WHEN flights.DEPARTURE_DELAY > ?1 THEN 1 ELSE 0 END)
FROM flights
GROUP BY flights.SCHEDULED_DEPARTURE
";

const QUERY_ROUTE_COUNTS: &str = r"
SELECT flights.ORIGIN_AIRPORT,
       flights.DESTINATION_AIRPORT,
       COUNT(flights.ID),
       SUM(CASE WHEN flights.DEPARTURE_DELAY > ?1 THEN 1 ELSE 0 END)
FROM flights
GROUP BY flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT
ORDER BY flights.ORIGIN_AIRPORT, flights.DESTINATION_AIRPORT
";

const QUERY_AIRPORT_COORDINATES: &str = r"
SELECT IATA_CODE, LATITUDE, LONGITUDE
FROM airports
WHERE LATITUDE IS NOT NULL AND LONGITUDE IS NOT NULL
";

/// Raw counts for one group, as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCounts<K> {
    /// Grouping key.
    pub key: K,
    /// Number of flights in the group.
    pub total_flights: u64,
    /// Number of flights delayed beyond the threshold.
    pub delayed_flights: u64,
}

/// Read-only access to the flights dataset.
///
/// The connection lives exactly as long as this value. Use [`FlightData::close`]
/// to release it and observe close errors, or simply drop it.
#[derive(Debug)]
pub struct FlightData {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl FlightData {
    /// Open an existing flights database read-only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseOpen`] if the file does not exist or cannot be
    /// opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        debug!("Opening flights database at {}", path.display());
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        info!("Flights database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an empty in-memory store with the dataset schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        for statement in schema::SCHEMA_STATEMENTS {
            conn.execute(statement, [])?;
        }

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseClose`] if `SQLite` refuses to close the handle.
    pub fn close(self) -> Result<()> {
        let Self { path, conn } = self;
        conn.close()
            .map_err(|(_, source)| Error::DatabaseClose { path, source })?;
        debug!("Flights database closed");
        Ok(())
    }

    /// Look up a single flight by its identifier.
    ///
    /// Returns zero or one record.
    #[must_use]
    pub fn get_flight_by_id(&self, id: i64) -> Vec<FlightRecord> {
        self.execute_query(
            "get_flight_by_id",
            QUERY_FLIGHT_BY_ID,
            [id],
            Self::row_to_flight,
        )
    }

    /// All flights scheduled on the given date.
    #[must_use]
    pub fn get_flights_by_date(&self, day: u32, month: u32, year: i32) -> Vec<FlightRecord> {
        self.execute_query(
            "get_flights_by_date",
            QUERY_FLIGHTS_BY_DATE,
            params![day, month, year],
            Self::row_to_flight,
        )
    }

    /// Delayed flights whose airline name contains `airline`.
    ///
    /// Matching uses the store's `LIKE` rule on `%airline%`; wildcard
    /// characters in the input are passed through untouched.
    #[must_use]
    pub fn get_delayed_flights_by_airline(&self, airline: &str) -> Vec<FlightRecord> {
        let pattern = format!("%{airline}%");
        self.execute_query(
            "get_delayed_flights_by_airline",
            QUERY_DELAYED_BY_AIRLINE,
            params![pattern, DELAY_THRESHOLD_MINUTES],
            Self::row_to_flight,
        )
    }

    /// Delayed flights whose origin airport code contains `airport`.
    #[must_use]
    pub fn get_delayed_flights_by_airport(&self, airport: &str) -> Vec<FlightRecord> {
        let pattern = format!("%{airport}%");
        self.execute_query(
            "get_delayed_flights_by_airport",
            QUERY_DELAYED_BY_AIRPORT,
            params![pattern, DELAY_THRESHOLD_MINUTES],
            Self::row_to_flight,
        )
    }

    /// Flight and delay counts per airline display name, ordered by name.
    #[must_use]
    pub fn airline_counts(&self) -> Vec<GroupCounts<String>> {
        self.execute_query(
            "airline_counts",
            QUERY_AIRLINE_COUNTS,
            [DELAY_THRESHOLD_MINUTES],
            |row| {
                let Some(airline) = value_as_text(&row.get(0)?) else {
                    return Ok(None);
                };
                Self::row_to_counts(row, 1, airline).map(Some)
            },
        )
    }

    /// Flight and delay counts per distinct scheduled departure value.
    ///
    /// The key is the raw stored value; deriving the hour is left to the
    /// caller since the column's type is not fixed by the dataset.
    #[must_use]
    pub fn departure_counts(&self) -> Vec<GroupCounts<Value>> {
        self.execute_query(
            "departure_counts",
            QUERY_DEPARTURE_COUNTS,
            [DELAY_THRESHOLD_MINUTES],
            |row| Self::row_to_counts(row, 1, row.get(0)?).map(Some),
        )
    }

    /// Flight and delay counts per (origin, destination) pair.
    #[must_use]
    pub fn route_counts(&self) -> Vec<GroupCounts<Route>> {
        self.execute_query(
            "route_counts",
            QUERY_ROUTE_COUNTS,
            [DELAY_THRESHOLD_MINUTES],
            |row| {
                let origin = value_as_text(&row.get(0)?);
                let destination = value_as_text(&row.get(1)?);
                let (Some(origin), Some(destination)) = (origin, destination) else {
                    return Ok(None);
                };
                Self::row_to_counts(row, 2, Route::new(origin, destination)).map(Some)
            },
        )
    }

    /// Coordinates of every airport that has both latitude and longitude.
    #[must_use]
    pub fn airport_coordinates(&self) -> HashMap<String, Coordinates> {
        self.execute_query(
            "airport_coordinates",
            QUERY_AIRPORT_COORDINATES,
            [],
            |row| {
                let Some(code) = value_as_text(&row.get(0)?) else {
                    return Ok(None);
                };
                let latitude = value_as_f64(&row.get(1)?);
                let longitude = value_as_f64(&row.get(2)?);
                Ok(Some((code, latitude, longitude)))
            },
        )
        .into_iter()
        .filter_map(|(code, latitude, longitude)| {
            Some((
                code,
                Coordinates {
                    latitude: latitude?,
                    longitude: longitude?,
                },
            ))
        })
        .collect()
    }

    /// Run a query, logging and swallowing any failure.
    ///
    /// Rows the mapper returns `None` for lack a usable key or label; they
    /// are dropped without failing the rest of the result.
    fn execute_query<T, P, F>(&self, operation: &'static str, sql: &str, params: P, map: F) -> Vec<T>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<Option<T>>,
    {
        match self.query_rows(sql, params, map) {
            Ok(rows) => {
                let fetched = rows.len();
                let rows: Vec<T> = rows.into_iter().flatten().collect();
                if rows.len() < fetched {
                    debug!(
                        operation,
                        skipped = fetched - rows.len(),
                        "skipped rows with missing text columns"
                    );
                }
                debug!(operation, rows = rows.len(), "query complete");
                rows
            }
            Err(err) => {
                error!(operation, error = %err, "returning empty result");
                Vec::new()
            }
        }
    }

    fn query_rows<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Read the count and delayed-count columns starting at `first`.
    fn row_to_counts<K>(row: &Row<'_>, first: usize, key: K) -> rusqlite::Result<GroupCounts<K>> {
        let total: i64 = row.get(first)?;
        let delayed: Option<i64> = row.get(first + 1)?;
        Ok(GroupCounts {
            key,
            total_flights: to_count(first, total)?,
            delayed_flights: to_count(first + 1, delayed.unwrap_or(0))?,
        })
    }

    /// Convert a database row to a [`FlightRecord`], or `None` if an airport
    /// code or the airline name is missing.
    fn row_to_flight(row: &Row<'_>) -> rusqlite::Result<Option<FlightRecord>> {
        let origin = value_as_text(&row.get(6)?);
        let destination = value_as_text(&row.get(7)?);
        let airline = value_as_text(&row.get(9)?);
        let (Some(origin_airport), Some(destination_airport), Some(airline)) =
            (origin, destination, airline)
        else {
            return Ok(None);
        };

        let scheduled: Value = row.get(1)?;
        let delay: Value = row.get(2)?;
        let day: i64 = row.get(3)?;
        let month: i64 = row.get(4)?;
        let year: i64 = row.get(5)?;

        Ok(Some(FlightRecord {
            id: row.get(0)?,
            scheduled_departure: departure_text(&scheduled),
            departure_delay: value_as_i64(&delay),
            day: u32::try_from(day).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(3, day))?,
            month: u32::try_from(month)
                .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(4, month))?,
            year: i32::try_from(year)
                .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(5, year))?,
            origin_airport,
            destination_airport,
            airline_id: row.get(8)?,
            airline,
        }))
    }
}

fn to_count(column: usize, value: i64) -> rusqlite::Result<u64> {
    u64::try_from(value).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(column, value))
}

/// Render a scheduled departure value as text; integers become `HHMM`.
fn departure_text(value: &Value) -> Option<String> {
    match value {
        Value::Integer(n) => Some(format!("{n:04}")),
        Value::Text(s) => Some(s.clone()),
        Value::Real(r) => Some(format!("{r:04.0}")),
        Value::Null | Value::Blob(_) => None,
    }
}

/// Text columns may hold numbers (numeric airport codes); blank text is
/// treated as missing.
fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Text(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Integer(n) => Some(n.to_string()),
        Value::Real(r) if r.is_finite() => Some(r.to_string()),
        _ => None,
    }
}

/// Numeric columns exported from dataframes often land as REAL.
#[allow(clippy::cast_possible_truncation)]
fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(n) => Some(*n),
        Value::Real(r) if r.is_finite() => Some(r.round() as i64),
        Value::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Real(r) if r.is_finite() => Some(*r),
        Value::Integer(n) => Some(*n as f64),
        Value::Text(s) => s.trim().parse().ok().filter(|r: &f64| r.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures;

    #[test]
    fn test_open_in_memory() {
        let store = FlightData::open_in_memory().unwrap();
        assert_eq!(store.path().to_string_lossy(), ":memory:");
        assert!(store.get_flight_by_id(1).is_empty());
    }

    #[test]
    fn test_open_missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FlightData::open(dir.path().join("missing.sqlite3")).unwrap_err();
        assert!(err.is_database_open());
    }

    #[test]
    fn test_open_file_based_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("flights.sqlite3");
        fixtures::write_sample_database(&db_path);

        let store = FlightData::open(&db_path).unwrap();
        assert_eq!(store.path(), db_path);
        assert_eq!(store.get_flight_by_id(1).len(), 1);

        let write = store
            .conn
            .execute("DELETE FROM flights WHERE ID = 1", []);
        assert!(write.is_err());

        store.close().unwrap();
    }

    #[test]
    fn test_get_flight_by_id() {
        let store = fixtures::sample_store();
        let flights = store.get_flight_by_id(1);
        assert_eq!(flights.len(), 1);

        let flight = &flights[0];
        assert_eq!(flight.airline, "A");
        assert_eq!(flight.origin_airport, "ATL");
        assert_eq!(flight.destination_airport, "JFK");
        assert_eq!(flight.departure_delay, Some(30));
        assert_eq!(flight.scheduled_departure.as_deref(), Some("0815"));
        assert_eq!((flight.day, flight.month, flight.year), (1, 1, 2015));
    }

    #[test]
    fn test_get_flight_by_id_nonexistent_is_empty() {
        let store = fixtures::sample_store();
        assert!(store.get_flight_by_id(99_999).is_empty());
    }

    #[test]
    fn test_get_flights_by_date() {
        let store = fixtures::sample_store();
        let flights = store.get_flights_by_date(1, 1, 2015);
        let ids: Vec<i64> = flights.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 7, 8]);

        assert!(store.get_flights_by_date(31, 12, 2015).is_empty());
    }

    #[test]
    fn test_get_delayed_flights_by_airline() {
        let store = fixtures::sample_store();
        let flights = store.get_delayed_flights_by_airline("A");
        let ids: Vec<i64> = flights.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(flights.iter().all(FlightRecord::is_delayed));
    }

    #[test]
    fn test_delayed_by_airline_threshold_is_strict() {
        let store = fixtures::sample_store();
        // Airline B has one flight at exactly 20 minutes and one at 21.
        let flights = store.get_delayed_flights_by_airline("B");
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].departure_delay, Some(21));
    }

    #[test]
    fn test_delayed_by_airline_follows_store_like_rule() {
        let store = fixtures::sample_store();
        fixtures::insert_airline(&store, 3, "Delta Air Lines Inc.");
        fixtures::insert_flight(&store, 11, 3, "DTW", "ATL", Some(40));

        // SQLite LIKE folds ASCII case.
        assert_eq!(store.get_delayed_flights_by_airline("delta").len(), 1);
        assert_eq!(store.get_delayed_flights_by_airline("Air Lines").len(), 1);
        assert!(store.get_delayed_flights_by_airline("United").is_empty());
    }

    #[test]
    fn test_wildcards_are_not_escaped() {
        let store = fixtures::sample_store();
        // "_" matches any single character, so every airline name matches.
        assert_eq!(store.get_delayed_flights_by_airline("_").len(), 4);
    }

    #[test]
    fn test_get_delayed_flights_by_airport() {
        let store = fixtures::sample_store();
        let flights = store.get_delayed_flights_by_airport("AT");
        assert_eq!(flights.len(), 3);
        assert!(flights.iter().all(|f| f.origin_airport == "ATL"));

        let flights = store.get_delayed_flights_by_airport("LAX");
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].id, 7);

        assert!(store.get_delayed_flights_by_airport("ORD").is_empty());
    }

    #[test]
    fn test_query_failure_returns_empty() {
        crate::logging::init_test_logging();
        let conn = Connection::open_in_memory().unwrap();
        let store = FlightData {
            path: PathBuf::from(":memory:"),
            conn,
        };

        assert!(store.get_flight_by_id(1).is_empty());
        assert!(store.get_flights_by_date(1, 1, 2015).is_empty());
        assert!(store.get_delayed_flights_by_airline("A").is_empty());
        assert!(store.get_delayed_flights_by_airport("ATL").is_empty());
        assert!(store.airline_counts().is_empty());
        assert!(store.departure_counts().is_empty());
        assert!(store.route_counts().is_empty());
        assert!(store.airport_coordinates().is_empty());
    }

    #[test]
    fn test_airline_counts() {
        let store = fixtures::sample_store();
        let counts = store.airline_counts();
        assert_eq!(
            counts,
            vec![
                GroupCounts {
                    key: "A".to_string(),
                    total_flights: 6,
                    delayed_flights: 3,
                },
                GroupCounts {
                    key: "B".to_string(),
                    total_flights: 4,
                    delayed_flights: 1,
                },
            ]
        );
    }

    #[test]
    fn test_route_counts() {
        let store = fixtures::sample_store();
        let counts = store.route_counts();
        let keys: Vec<String> = counts.iter().map(|c| c.key.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "ATL -> JFK",
                "ATL -> LAX",
                "JFK -> ATL",
                "LAX -> SFO",
                "SFO -> LAX"
            ]
        );
        assert_eq!(counts[0].total_flights, 3);
        assert_eq!(counts[0].delayed_flights, 3);
    }

    #[test]
    fn test_departure_counts_keep_raw_values() {
        let store = fixtures::sample_store();
        let counts = store.departure_counts();
        let total: u64 = counts.iter().map(|c| c.total_flights).sum();
        assert_eq!(total, 10);
        assert!(counts.iter().any(|c| c.key == Value::Integer(815)));
        assert!(counts
            .iter()
            .any(|c| c.key == Value::Text("23:10".to_string())));
    }

    #[test]
    fn test_airport_coordinates_skip_missing() {
        let store = fixtures::sample_store();
        let coords = store.airport_coordinates();
        assert_eq!(coords.len(), 3);
        assert!(coords.contains_key("ATL"));
        assert!(!coords.contains_key("SFO"));
        assert!((coords["JFK"].latitude - 40.639_75).abs() < 1e-9);
    }

    #[test]
    fn test_real_typed_delay_is_read() {
        let store = fixtures::sample_store();
        store
            .conn
            .execute(
                "UPDATE flights SET DEPARTURE_DELAY = 35.0 WHERE ID = 4",
                [],
            )
            .unwrap();
        let flight = store.get_flight_by_id(4);
        assert_eq!(flight[0].departure_delay, Some(35));
    }

    /// A store whose columns carry no type affinity, as in loosely
    /// imported datasets.
    fn untyped_store() -> FlightData {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r"
            CREATE TABLE airlines (ID, AIRLINE);
            CREATE TABLE airports (IATA_CODE, LATITUDE, LONGITUDE);
            CREATE TABLE flights (ID, YEAR, MONTH, DAY, AIRLINE, ORIGIN_AIRPORT,
                                  DESTINATION_AIRPORT, SCHEDULED_DEPARTURE, DEPARTURE_DELAY);
            INSERT INTO airlines VALUES (1, 'A'), (2, NULL);
            INSERT INTO airports VALUES (10397, 33.6, -84.4), (NULL, 1.0, 1.0);
            INSERT INTO flights VALUES
                (1, 2015, 10, 1, 1, 10397, 'JFK', 800, 30),
                (2, 2015, 10, 1, 1, 'ATL', NULL, 900, 45),
                (3, 2015, 10, 1, 2, 'ATL', 'JFK', 1000, 50),
                (4, 2015, 10, 1, 1, 'ATL', 'JFK', 1100, 0);
            ",
        )
        .unwrap();
        FlightData {
            path: PathBuf::from(":memory:"),
            conn,
        }
    }

    #[test]
    fn test_numeric_airport_codes_are_read_as_text() {
        let store = untyped_store();

        let flight = store.get_flight_by_id(1);
        assert_eq!(flight.len(), 1);
        assert_eq!(flight[0].origin_airport, "10397");

        let coords = store.airport_coordinates();
        assert_eq!(coords.len(), 1);
        assert!(coords.contains_key("10397"));
    }

    #[test]
    fn test_missing_text_columns_skip_only_their_row() {
        let store = untyped_store();

        // Flight 2 has no destination, flight 3 an airline without a name.
        assert!(store.get_flight_by_id(2).is_empty());
        assert!(store.get_flight_by_id(3).is_empty());
        let flights = store.get_flights_by_date(1, 10, 2015);
        let ids: Vec<i64> = flights.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 4]);

        let routes = store.route_counts();
        let keys: Vec<String> = routes.iter().map(|c| c.key.to_string()).collect();
        assert_eq!(keys, vec!["10397 -> JFK", "ATL -> JFK"]);

        let airlines = store.airline_counts();
        assert_eq!(airlines.len(), 1);
        assert_eq!(airlines[0].key, "A");
        assert_eq!(airlines[0].total_flights, 3);
    }

    #[test]
    fn test_value_as_text() {
        assert_eq!(value_as_text(&Value::Text("LAX".to_string())).as_deref(), Some("LAX"));
        assert_eq!(value_as_text(&Value::Integer(10397)).as_deref(), Some("10397"));
        assert_eq!(value_as_text(&Value::Text("  ".to_string())), None);
        assert_eq!(value_as_text(&Value::Null), None);
    }

    #[test]
    fn test_departure_text() {
        assert_eq!(departure_text(&Value::Integer(5)).as_deref(), Some("0005"));
        assert_eq!(
            departure_text(&Value::Text("13:45".to_string())).as_deref(),
            Some("13:45")
        );
        assert_eq!(departure_text(&Value::Null), None);
    }

    #[test]
    fn test_value_coercion() {
        assert_eq!(value_as_i64(&Value::Real(20.6)), Some(21));
        assert_eq!(value_as_i64(&Value::Text(" -4 ".to_string())), Some(-4));
        assert_eq!(value_as_i64(&Value::Null), None);
        assert_eq!(value_as_f64(&Value::Integer(3)), Some(3.0));
        assert_eq!(value_as_f64(&Value::Text("x".to_string())), None);
    }
}
