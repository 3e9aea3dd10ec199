//! Configuration management for flightdelays.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default application directory name.
const APP_DIR_NAME: &str = "flightdelays";

/// Default database file, relative to the working directory.
const DATABASE_FILE_NAME: &str = "flights.sqlite3";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "FLIGHTDELAYS_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTDELAYS_`, sections split by `__`)
/// 2. TOML config file at `~/.config/flightdelays/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Chart and map output configuration.
    pub render: RenderConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the flights database.
    /// Defaults to `flights.sqlite3` in the working directory.
    pub database_path: Option<PathBuf>,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

/// Chart and map output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory rendered charts and maps are written to.
    /// Defaults to `~/.local/share/flightdelays`.
    pub output_dir: Option<PathBuf>,
    /// Open rendered artifacts in the default viewer.
    pub open_viewer: bool,
    /// Chart width in pixels.
    pub chart_width: u32,
    /// Chart height in pixels.
    pub chart_height: u32,
    /// File name of the route map document.
    pub map_file_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5025,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: None, // Resolved at runtime
            open_viewer: true,
            chart_width: 1200,
            chart_height: 600,
            map_file_name: "delayed_routes_map.html".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources, reading the TOML file from
    /// `config_path` or the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default output directory.
    #[must_use]
    pub fn default_output_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.render.chart_width == 0 || self.render.chart_height == 0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "chart dimensions must be greater than 0 (got {}x{})",
                    self.render.chart_width, self.render.chart_height
                ),
            });
        }

        let map_file = std::path::Path::new(&self.render.map_file_name);
        let is_html = map_file
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if !is_html || map_file.components().count() != 1 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "map_file_name must be a plain .html file name, got {:?}",
                    self.render.map_file_name
                ),
            });
        }

        self.bind_address()?;
        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }

    /// Get the output directory, resolving defaults if not set.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.render
            .output_dir
            .clone()
            .unwrap_or_else(Self::default_output_dir)
    }

    /// Get the full path of the route map document.
    #[must_use]
    pub fn map_path(&self) -> PathBuf {
        self.output_dir().join(&self.render.map_file_name)
    }

    /// Parse the configured host and port into a socket address.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not an IP address.
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse::<SocketAddr>()
            .or_else(|_| {
                format!("[{}]:{}", self.server.host, self.server.port).parse::<SocketAddr>()
            })
            .map_err(|_| Error::ConfigValidation {
                message: format!("server.host is not an IP address: {}", self.server.host),
            })
    }
}
