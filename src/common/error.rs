//! Error types for the test runner
//!
//! Only file-level problems are surfaced as [`Error`]. Everything that goes
//! wrong while executing a single scenario is recorded as a value
//! ([`StepError`] or a failed verdict) so the batch keeps running.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the test runner
#[derive(Error, Debug)]
pub enum Error {
    // === Scenario File Errors ===
    #[error("Failed to read test file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to parse test file '{file}': {message}")]
    ScenarioParse { file: String, message: String },

    #[error("No test files found in '{0}'. Run 'test-it init' to create one")]
    NoTestFiles(String),

    #[error("{failed} scenario(s) failed, {broken} file(s) could not be run")]
    TestsFailed { failed: usize, broken: usize },

    #[error("Sample file '{0}' already exists. Use --force to overwrite")]
    SampleExists(String),

    // === Transport Errors ===
    #[error("HTTP transport error: {0}")]
    Transport(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a scenario parse error for a file
    pub fn scenario_parse(file: &str, message: impl ToString) -> Self {
        Self::ScenarioParse {
            file: file.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a file read error from an IO failure
    pub fn file_read(path: &str, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.to_string(),
            error: error.to_string(),
        }
    }
}

/// A soft failure in one step of executing a scenario
///
/// These are logged and attached to the scenario's diagnostics; they never
/// abort the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("failed to serialize request body: {0}")]
    Serialize(String),

    #[error("malformed request: {0}")]
    InvalidRequest(String),

    #[error("response body is not a JSON object: {0}")]
    ResponseParse(String),
}
