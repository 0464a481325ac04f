//! Configuration error type.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not available")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Configuration serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => "No configuration directory found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::SerializeError(_) => "Failed to save configuration.",
            ConfigError::Io(_) => "A file operation failed. Please try again.",
        }
    }
}
