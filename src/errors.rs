/*!
 * Error types for the graded-reader application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when calling the speech-synthesis service
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// Error when sending the request fails
    #[error("Synthesis request failed: {0}")]
    Request(String),

    /// Error returned by the service itself
    #[error("Synthesis service responded with error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// Error with authentication (bad key or region)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Nothing to synthesize
    #[error("Refusing to synthesize empty text")]
    EmptyText,

    /// Missing or invalid service configuration
    #[error("Speech configuration error: {0}")]
    Configuration(String),

    /// Error writing the audio file
    #[error("Failed to write audio file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while reading the input script
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The input file does not exist
    #[error("Input file does not exist: {0}")]
    NotFound(String),

    /// The input file could not be read as UTF-8 text
    #[error("Failed to read input file {path}: {message}")]
    Unreadable {
        /// Path of the input file
        path: String,
        /// Underlying error message
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error reading the script
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Error from speech synthesis
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Error writing the flashcard export
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(error: csv::Error) -> Self {
        Self::Csv(error.to_string())
    }
}
