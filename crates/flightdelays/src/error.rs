//! Error types for flightdelays.
//!
//! Query failures inside the data-access layer never surface here: they are
//! logged and turned into empty results. This type covers everything around
//! that boundary, such as opening the store, loading configuration, writing
//! rendered artifacts and running the HTTP server.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightdelays operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open the flights database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The database handle could not be released cleanly.
    #[error("failed to close database at {path}: {source}")]
    DatabaseClose {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Presentation Errors ===
    /// The default viewer could not be launched for a rendered artifact.
    #[error("failed to open {path} in the default viewer: {source}")]
    Viewer {
        /// Path of the artifact that was being opened.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {message}")]
    Server {
        /// Description of what went wrong.
        message: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// User supplied input could not be interpreted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightdelays operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a server error wrapping an I/O failure.
    #[must_use]
    pub fn server(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Server {
            message: message.into(),
            source,
        }
    }

    /// Check if this error came from opening the store.
    #[must_use]
    pub fn is_database_open(&self) -> bool {
        matches!(self, Self::DatabaseOpen { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_only_open_error() -> Option<rusqlite::Error> {
        rusqlite::Connection::open_with_flags(
            "/nonexistent/path/flights.sqlite3",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        )
        .err()
    }

    #[test]
    fn test_invalid_input_display() {
        let err = Error::invalid_input("date must be DD/MM/YYYY");
        assert_eq!(err.to_string(), "invalid input: date must be DD/MM/YYYY");
    }

    #[test]
    fn test_server_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = Error::server("failed to bind 127.0.0.1:5025", io_err);
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:5025"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        if let Some(sqlite_err) = read_only_open_error() {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
            assert!(!err.is_database_open());
        }
    }

    #[test]
    fn test_database_open_error_display() {
        if let Some(sqlite_err) = read_only_open_error() {
            let err = Error::DatabaseOpen {
                path: PathBuf::from("/nonexistent/path/flights.sqlite3"),
                source: sqlite_err,
            };
            assert!(err.is_database_open());
            assert!(err
                .to_string()
                .contains("/nonexistent/path/flights.sqlite3"));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "chart_width must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("chart_width"));
    }

    #[test]
    fn test_viewer_error_display() {
        let err = Error::Viewer {
            path: PathBuf::from("/tmp/map.html"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "xdg-open not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/map.html"));
        assert!(msg.contains("default viewer"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
