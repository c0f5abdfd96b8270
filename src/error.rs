use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the client
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("HTTP error: {0}")]
    #[diagnostic(code(onemapan::http))]
    Http(#[from] reqwest::Error),

    #[error("API error: HTTP {status} - {message}")]
    #[diagnostic(code(onemapan::api))]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    #[diagnostic(code(onemapan::auth))]
    Auth(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(onemapan::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(onemapan::config))]
    Config(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(onemapan::validation))]
    Validation(String),

    #[error(transparent)]
    #[diagnostic(code(onemapan::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(onemapan::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(onemapan::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
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
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create API errors from a non-success response
pub fn api_error(status: u16, message: &str) -> Error {
    Error::Api {
        status,
        message: message.to_string(),
    }
}

/// Helper to create authentication errors
pub fn auth_error(message: &str) -> Error {
    Error::Auth(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
