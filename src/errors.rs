use thiserror::Error;

use crate::config::ConfigError;

/// Unified error type for the domain and core layers.
#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("Rating must be a whole number between 1 and 5, got `{0}`")]
    InvalidRating(String),
    #[error("Unknown form field `{0}`")]
    UnknownField(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Errors that terminate the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BlueprintError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl From<std::io::Error> for BlueprintError {
    fn from(err: std::io::Error) -> Self {
        BlueprintError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BlueprintError {
    fn from(err: serde_json::Error) -> Self {
        BlueprintError::Storage(err.to_string())
    }
}

impl From<ConfigError> for BlueprintError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => BlueprintError::Storage(io.to_string()),
            ConfigError::Serde(message) | ConfigError::Invalid(message) => {
                BlueprintError::Config(message)
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(BlueprintError::from(err))
    }
}
