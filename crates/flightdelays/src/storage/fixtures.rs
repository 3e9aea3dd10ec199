//! Shared test fixtures: a ten-flight dataset over two airlines.
//!
//! Airline A flies six flights, three of them more than 20 minutes late.
//! Airline B flies four, one late, one at exactly 20 minutes and one with no
//! recorded delay. Scheduled departures mix integer `HHMM`, text `HHMM`,
//! `HH:MM` and full datetimes. SFO has no latitude.

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, Connection};

use super::{schema, FlightData};

/// (id, airline, origin, destination, scheduled departure, delay, day, month)
type FlightRow = (i64, i64, &'static str, &'static str, Value, Option<i64>, u32, u32);

fn sample_flights() -> Vec<FlightRow> {
    let text = |s: &str| Value::Text(s.to_string());
    vec![
        (1, 1, "ATL", "JFK", Value::Integer(815), Some(30), 1, 1),
        (2, 1, "ATL", "JFK", text("0830"), Some(45), 1, 1),
        (3, 1, "ATL", "JFK", text("1405"), Some(25), 1, 1),
        (4, 1, "ATL", "LAX", Value::Integer(1410), Some(0), 2, 1),
        (5, 1, "JFK", "ATL", text("23:10"), Some(10), 2, 1),
        (6, 1, "JFK", "ATL", text("2015-01-02 23:55:00"), Some(-5), 2, 1),
        (7, 2, "LAX", "SFO", Value::Integer(5), Some(21), 1, 1),
        (8, 2, "LAX", "SFO", text("0005"), Some(20), 1, 1),
        (9, 2, "SFO", "LAX", Value::Integer(600), None, 2, 1),
        (10, 2, "SFO", "LAX", text("0645"), Some(5), 2, 1),
    ]
}

fn seed(conn: &Connection) {
    for statement in schema::SCHEMA_STATEMENTS {
        conn.execute(statement, []).expect("schema");
    }

    conn.execute_batch(
        r"
        INSERT INTO airlines (ID, AIRLINE) VALUES (1, 'A'), (2, 'B');
        INSERT INTO airports (IATA_CODE, AIRPORT, LATITUDE, LONGITUDE) VALUES
            ('ATL', 'Hartsfield-Jackson Atlanta International Airport', 33.64044, -84.42694),
            ('JFK', 'John F. Kennedy International Airport', 40.63975, -73.77893),
            ('LAX', 'Los Angeles International Airport', 33.94254, -118.40807),
            ('SFO', 'San Francisco International Airport', NULL, -122.37484);
        ",
    )
    .expect("reference data");

    for (id, airline, origin, destination, scheduled, delay, day, month) in sample_flights() {
        conn.execute(
            r"
            INSERT INTO flights (ID, YEAR, MONTH, DAY, AIRLINE, ORIGIN_AIRPORT,
                                 DESTINATION_AIRPORT, SCHEDULED_DEPARTURE, DEPARTURE_DELAY)
            VALUES (?1, 2015, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
            params![id, month, day, airline, origin, destination, scheduled, delay],
        )
        .expect("flight row");
    }
}

/// In-memory store holding the sample dataset.
pub(crate) fn sample_store() -> FlightData {
    let store = FlightData::open_in_memory().expect("in-memory store");
    seed(&store.conn);
    store
}

/// Write the sample dataset to a database file at `path`.
pub(crate) fn write_sample_database(path: &Path) {
    let conn = Connection::open(path).expect("fixture database");
    seed(&conn);
}

/// Add an airline to a fixture store.
pub(crate) fn insert_airline(store: &FlightData, id: i64, name: &str) {
    store
        .conn
        .execute(
            "INSERT INTO airlines (ID, AIRLINE) VALUES (?1, ?2)",
            params![id, name],
        )
        .expect("airline row");
}

/// Add a flight on 3 January 2015 at noon to a fixture store.
pub(crate) fn insert_flight(
    store: &FlightData,
    id: i64,
    airline: i64,
    origin: &str,
    destination: &str,
    delay: Option<i64>,
) {
    store
        .conn
        .execute(
            r"
            INSERT INTO flights (ID, YEAR, MONTH, DAY, AIRLINE, ORIGIN_AIRPORT,
                                 DESTINATION_AIRPORT, SCHEDULED_DEPARTURE, DEPARTURE_DELAY)
            VALUES (?1, 2015, 1, 3, ?2, ?3, ?4, '1200', ?5)
            ",
            params![id, airline, origin, destination, delay],
        )
        .expect("flight row");
}

/// Overwrite the scheduled departure of a fixture flight.
pub(crate) fn set_scheduled_departure(store: &FlightData, id: i64, value: Value) {
    store
        .conn
        .execute(
            "UPDATE flights SET SCHEDULED_DEPARTURE = ?1 WHERE ID = ?2",
            params![value, id],
        )
        .expect("flight update");
}
