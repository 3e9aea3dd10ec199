//! `SQLite` schema of the flights dataset.
//!
//! The production store already exists and is opened read-only; these
//! statements only build empty in-memory stores for fixtures and tests.

/// SQL statement to create the airlines table.
pub const CREATE_AIRLINES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS airlines (
    ID INTEGER PRIMARY KEY,
    AIRLINE TEXT NOT NULL
)
";

/// SQL statement to create the airports table.
pub const CREATE_AIRPORTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS airports (
    IATA_CODE TEXT PRIMARY KEY,
    AIRPORT TEXT,
    CITY TEXT,
    STATE TEXT,
    COUNTRY TEXT,
    LATITUDE REAL,
    LONGITUDE REAL
)
";

/// SQL statement to create the flights table.
pub const CREATE_FLIGHTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS flights (
    ID INTEGER PRIMARY KEY,
    YEAR INTEGER NOT NULL,
    MONTH INTEGER NOT NULL,
    DAY INTEGER NOT NULL,
    AIRLINE INTEGER NOT NULL REFERENCES airlines(ID),
    ORIGIN_AIRPORT TEXT NOT NULL,
    DESTINATION_AIRPORT TEXT NOT NULL,
    SCHEDULED_DEPARTURE,
    DEPARTURE_DELAY INTEGER
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_AIRLINES_TABLE,
    CREATE_AIRPORTS_TABLE,
    CREATE_FLIGHTS_TABLE,
];
