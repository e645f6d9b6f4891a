//! Error types for logroute

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for logging operations
#[derive(Error, Debug)]
pub enum LogError {
    /// A logger with this name is already registered
    #[error("Logger already exists: {0}")]
    DuplicateLogger(String),

    /// No logger with this name is registered
    #[error("Logger not found: {0}")]
    LoggerNotFound(String),

    /// File sink could not open its target
    #[error("Cannot open log file {}: {source}", path.display())]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a record to a sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Text that does not name a log level
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Malformed logging configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using LogError
pub type LogResult<T> = Result<T, LogError>;
