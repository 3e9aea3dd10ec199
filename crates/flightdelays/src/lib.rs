//! `flightdelays` - Departure delay analytics over a flights dataset
//!
//! This library provides read-only access to a `SQLite` flights database, the
//! delay-rate aggregations built on it, and the adapters that present them as
//! JSON over HTTP, SVG charts and an HTML route map.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod delays;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod server;
pub mod storage;

pub use config::Config;
pub use delays::{DelayStat, RouteMatrix};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use models::{FlightRecord, Route};
pub use storage::FlightData;
