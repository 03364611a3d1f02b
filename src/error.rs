//! Error types for lintconf

use crate::validate::ValidationReport;
use thiserror::Error;

/// Result type alias for lintconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for lintconf
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse options: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid option spec for {key}: {reason}")]
    InvalidOptionSpec { key: String, reason: String },

    #[error("Preset '{preset}' does not fit the schema:\n{report}")]
    InvalidPreset {
        preset: String,
        report: ValidationReport,
    },

    // -------------------------------------------------------------------------
    // Resolution Errors
    // -------------------------------------------------------------------------
    #[error("Invalid options:\n{0}")]
    Validation(ValidationReport),

    #[error("Resolver precondition violated: {0}")]
    Precondition(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this error was caused by the user's options rather than by
    /// misuse of the library
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::UnknownOption(_) | Error::Parse(_)
        )
    }

    /// Validation report carried by this error, if any
    #[must_use]
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Error::Validation(report) | Error::InvalidPreset { report, .. } => Some(report),
            _ => None,
        }
    }
}
