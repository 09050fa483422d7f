//! Error types for the Grounded CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application, including configuration, I/O, transport, retrieval,
//! generation, and prompt errors.

use thiserror::Error;

/// Unified error type for the Grounded CLI.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
///
/// Two tiers of failure exist in practice: retrieval-side errors are absorbed
/// by their callers (the pipeline degrades to an ungrounded answer), while
/// generation-side errors are terminal for the current turn and propagate up
/// to the surface that started it.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level errors from the platform request primitive
    #[error("Transport error: {0}")]
    Transport(String),

    /// Retrieval backend errors (absorbed at the retrieval client boundary)
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Text-generation backend errors (terminal for the turn)
    #[error("Generation error: {0}")]
    Generation(String),

    /// Prompt construction errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
