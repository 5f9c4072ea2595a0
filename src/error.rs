use miette::{Diagnostic, Result};
use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(office_display::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(office_display::config),
        help("check the variables in your environment or .env file")
    )]
    Config(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(office_display::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(office_display::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(office_display::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(office_display::other))]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("Invalid URL: {}", err))
    }
}

/// Type alias for Result with our Error type
pub type DisplayResult<T> = Result<T, Error>;

/// Why a single widget refresh did not produce a payload.
///
/// These never escape a widget: every variant collapses into the widget's
/// failed display state and the next scheduled poll tries again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The backend answered with a non-success status
    #[error("Server responded with HTTP {0}")]
    Http(StatusCode),

    /// The body was not the expected JSON shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The request never completed
    #[error("{0}")]
    Network(String),
}

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing or invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
