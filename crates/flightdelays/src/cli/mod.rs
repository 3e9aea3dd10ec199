//! Command-line interface for flightdelays.
//!
//! This module provides the CLI structure and command definitions for the
//! `fltdelay` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    parse_date, AirlineCommand, AirportCommand, ChartArg, ChartCommand, ConfigCommand,
    DateCommand, FlightCommand, MapCommand, OutputFormat, ServeCommand,
};

/// fltdelay - Explore flight departure delays
///
/// Looks up flights, aggregates delay rates by airline, hour and route, and
/// presents them as text, JSON, charts, a route map or an HTTP API.
#[derive(Debug, Parser)]
#[command(name = "fltdelay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the flights database (overrides configuration)
    #[arg(long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a flight by its identifier
    Flight(FlightCommand),

    /// Show all flights on a date
    Date(DateCommand),

    /// Show delayed flights by airline name
    Airline(AirlineCommand),

    /// Show delayed flights by origin airport
    Airport(AirportCommand),

    /// Draw a delay chart
    Chart(ChartCommand),

    /// Draw the delayed-routes map
    Map(MapCommand),

    /// Serve delay statistics over HTTP
    Serve(ServeCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            database: None,
            verbose,
            quiet,
            command: Command::Config(ConfigCommand::Path),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "fltdelay");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flight() {
        let cli = Cli::try_parse_from(["fltdelay", "flight", "42", "--format", "json"]).unwrap();
        match cli.command {
            Command::Flight(cmd) => {
                assert_eq!(cmd.id, 42);
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_flight_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["fltdelay", "flight", "AA100"]).is_err());
    }

    #[test]
    fn test_parse_date() {
        let cli = Cli::try_parse_from(["fltdelay", "date", "01/02/2015"]).unwrap();
        match cli.command {
            Command::Date(cmd) => {
                assert_eq!(cmd.date, NaiveDate::from_ymd_opt(2015, 2, 1).unwrap());
                assert_eq!(cmd.format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["fltdelay", "date", "2015-02-01"]).is_err());
    }

    #[test]
    fn test_parse_airline_and_airport() {
        let cli = Cli::try_parse_from(["fltdelay", "airline", "Delta"]).unwrap();
        assert!(matches!(cli.command, Command::Airline(ref cmd) if cmd.name == "Delta"));

        let cli = Cli::try_parse_from(["fltdelay", "airport", "LA", "-f", "json"]).unwrap();
        assert!(
            matches!(cli.command, Command::Airport(ref cmd) if cmd.code == "LA" && cmd.format == OutputFormat::Json)
        );
    }

    #[test]
    fn test_parse_chart() {
        let cli = Cli::try_parse_from(["fltdelay", "chart", "routes", "--no-open"]).unwrap();
        match cli.command {
            Command::Chart(cmd) => {
                assert_eq!(cmd.kind, ChartArg::Routes);
                assert!(cmd.no_open);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["fltdelay", "chart", "pie"]).is_err());
    }

    #[test]
    fn test_parse_map() {
        let cli = Cli::try_parse_from(["fltdelay", "map", "-o", "/tmp/routes.html"]).unwrap();
        match cli.command {
            Command::Map(cmd) => {
                assert_eq!(cmd.output, Some(PathBuf::from("/tmp/routes.html")));
                assert!(!cmd.no_open);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["fltdelay", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve(cmd) => {
                assert_eq!(cmd.port, Some(8080));
                assert!(cmd.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = Cli::try_parse_from(["fltdelay", "config", "validate", "/tmp/c.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "fltdelay",
            "-c",
            "/custom/config.toml",
            "--database",
            "/data/flights.sqlite3",
            "-vv",
            "config",
            "path",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.database, Some(PathBuf::from("/data/flights.sqlite3")));
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["fltdelay", "config", "show", "-q"]).unwrap();
        assert!(cli.quiet);
    }
}
