//! Error types for the fieldlog facade.
//!
//! Runtime reconfiguration (`set_level`, `set_log_format`) returns these to the
//! caller. Construction-time failures carry the same variants but abort startup
//! unless the caller opts into `LoggerBuilder::try_build`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for logger operations.
#[derive(Error, Debug)]
pub enum LoggerError {
    /// Level string is not one of the recognized levels
    #[error("invalid log level: {0:?}")]
    InvalidLogLevel(String),

    /// Format string is neither `json` nor `console`
    #[error("invalid log format: {0:?}")]
    InvalidLogFormat(String),

    /// The `LOG_FILE` destination could not be opened for appending
    #[error("failed to open log file {path}: {source}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file could not be read or parsed
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Errors loading a `[logging]` settings section.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read the settings file from disk
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Convenience type alias for logger results.
pub type Result<T> = std::result::Result<T, LoggerError>;
