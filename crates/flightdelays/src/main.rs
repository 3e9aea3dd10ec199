//! `fltdelay` - CLI for flightdelays
//!
//! This binary provides the command-line interface for looking up flights,
//! drawing delay charts and maps, and serving delay statistics over HTTP.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};

use flightdelays::cli::{
    ChartCommand, Cli, Command, ConfigCommand, MapCommand, OutputFormat, ServeCommand,
};
use flightdelays::render::{self, viewer};
use flightdelays::{init_logging, server, Config, Error, FlightData, FlightRecord};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Validating a file must not depend on the active configuration loading
    if let Command::Config(ConfigCommand::Validate { file }) = &cli.command {
        return handle_validate(file.clone().or_else(|| cli.config.clone()));
    }

    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(path) = cli.database.clone() {
        config.storage.database_path = Some(path);
    }

    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, &config_cmd),
        Command::Serve(serve_cmd) => handle_serve(config, &serve_cmd),
        command => {
            let store = FlightData::open(config.database_path())?;
            let result = run_with_store(&store, &config, command);
            finish(result, store.close())
        }
    }
}

fn run_with_store(store: &FlightData, config: &Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Flight(cmd) => print_flights(&store.get_flight_by_id(cmd.id), cmd.format),
        Command::Date(cmd) => {
            use chrono::Datelike;
            let flights = store.get_flights_by_date(cmd.date.day(), cmd.date.month(), cmd.date.year());
            print_flights(&flights, cmd.format)
        }
        Command::Airline(cmd) => {
            print_flights(&store.get_delayed_flights_by_airline(&cmd.name), cmd.format)
        }
        Command::Airport(cmd) => {
            print_flights(&store.get_delayed_flights_by_airport(&cmd.code), cmd.format)
        }
        Command::Chart(cmd) => handle_chart(store, config, &cmd),
        Command::Map(cmd) => handle_map(store, config, &cmd),
        Command::Serve(_) | Command::Config(_) => Ok(()),
    }
}

/// Combine a command's outcome with closing the store. A command error wins
/// over a close error, which is then only logged.
fn finish(result: anyhow::Result<()>, closed: flightdelays::Result<()>) -> anyhow::Result<()> {
    match (result, closed) {
        (Err(err), Err(close_err)) => {
            error!(error = %close_err, "Failed to close flights database");
            Err(err)
        }
        (Ok(()), Err(close_err)) => Err(close_err.into()),
        (result, Ok(())) => result,
    }
}

fn print_flights(flights: &[FlightRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(flights)?),
        OutputFormat::Text => {
            if flights.is_empty() {
                println!("No flights found.");
            } else {
                for flight in flights {
                    println!("{}", flight.summary());
                }
                println!("Got {} results.", flights.len());
            }
        }
    }
    Ok(())
}

fn should_open(config: &Config, no_open: bool) -> bool {
    config.render.open_viewer && !no_open
}

fn handle_chart(store: &FlightData, config: &Config, cmd: &ChartCommand) -> anyhow::Result<()> {
    let path = render::render_chart(cmd.kind.into(), store, config)?;
    println!("{}", path.display());

    if should_open(config, cmd.no_open) {
        viewer::open_in_viewer(&path)?;
        viewer::wait_for_dismiss("Press Enter to close the chart...")?;
    }
    Ok(())
}

fn handle_map(store: &FlightData, config: &Config, cmd: &MapCommand) -> anyhow::Result<()> {
    let target = cmd.output.clone().unwrap_or_else(|| config.map_path());
    let (dir, file_name) = split_output(&target)?;

    let path = render::render_route_map(store, &dir, &file_name)?;
    println!("{}", path.display());

    if should_open(config, cmd.no_open) {
        viewer::open_in_viewer(&path)?;
    }
    Ok(())
}

/// Split an output path into its directory and file name.
fn split_output(output: &Path) -> Result<(PathBuf, String), Error> {
    let file_name = output
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::invalid_input(format!("not a file path: {}", output.display())))?;
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name.to_string()))
}

fn handle_serve(mut config: Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    if let Some(host) = &cmd.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    let addr = config.bind_address()?;

    let store = FlightData::open(config.database_path())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    debug!("Runtime started");

    runtime.block_on(server::serve(addr, store))?;
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!();
                println!("[Render]");
                println!("  Output directory:   {}", config.output_dir().display());
                println!("  Open viewer:        {}", config.render.open_viewer);
                println!(
                    "  Chart size:         {}x{}",
                    config.render.chart_width, config.render.chart_height
                );
                println!("  Map file:           {}", config.render.map_file_name);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            handle_validate(file.clone())?;
        }
    }
    Ok(())
}

fn handle_validate(file: Option<PathBuf>) -> anyhow::Result<()> {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    match Config::load_from(Some(path)) {
        Ok(_) => println!("Configuration is valid."),
        Err(e) => println!("Configuration error: {e}"),
    }
    Ok(())
}
