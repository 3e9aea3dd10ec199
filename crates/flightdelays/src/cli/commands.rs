//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::render::ChartKind;

/// Look up a single flight.
#[derive(Debug, Args)]
pub struct FlightCommand {
    /// Flight identifier
    pub id: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// List all flights on a date.
#[derive(Debug, Args)]
pub struct DateCommand {
    /// Date in DD/MM/YYYY form
    #[arg(value_parser = parse_date)]
    pub date: NaiveDate,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// List delayed flights for airlines whose name contains a term.
#[derive(Debug, Args)]
pub struct AirlineCommand {
    /// Part of the airline name
    pub name: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// List delayed flights departing airports whose code contains a term.
#[derive(Debug, Args)]
pub struct AirportCommand {
    /// Part of the origin airport IATA code
    pub code: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Render a delay chart.
#[derive(Debug, Args)]
pub struct ChartCommand {
    /// Which chart to draw
    #[arg(value_enum)]
    pub kind: ChartArg,

    /// Write the file without opening a viewer
    #[arg(long)]
    pub no_open: bool,
}

/// Render the delayed-routes map.
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Write the map to this file instead of the output directory
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the file without opening a viewer
    #[arg(long)]
    pub no_open: bool,
}

/// Serve the JSON API.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to bind (overrides configuration)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        file: Option<PathBuf>,
    },
}

/// Chart selection argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartArg {
    /// Percent delayed per airline
    Airline,
    /// Percent delayed per hour of day
    Hour,
    /// Heatmap of percent delayed per route
    Routes,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Airline => Self::Airline,
            ChartArg::Hour => Self::Hour,
            ChartArg::Routes => Self::Routes,
        }
    }
}

/// Output format for lookup commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per flight
    #[default]
    Text,
    /// JSON array
    Json,
}

/// Parse a `DD/MM/YYYY` date.
///
/// # Errors
///
/// Returns a message suitable for clap if the input is not a valid date.
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y")
        .map_err(|_| format!("expected a date as DD/MM/YYYY, got {input:?}"))
}
