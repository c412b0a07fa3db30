//! Error types for memlog
//!
//! This module defines the error types surfaced by the public API. Emission
//! itself never fails: the only error a logging call path can raise is
//! [`MemLogError::InvalidName`] from `get_logger`. Everything else belongs to
//! configuration loading and validation.

use thiserror::Error;

use crate::sinks::traits::SinkError;

/// Main error type for memlog operations
#[derive(Error, Debug)]
pub enum MemLogError {
    /// A logger was requested with an empty name
    #[error("A Logger must have a name")]
    InvalidName,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    ConfigFileMissing(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// I/O errors (configuration files)
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlError {
        #[from]
        source: toml::de::Error,
    },

    /// Sink-related errors
    #[error("Sink error: {source}")]
    SinkError {
        #[from]
        source: SinkError,
    },

    /// Generic internal errors
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for memlog operations
pub type Result<T> = std::result::Result<T, MemLogError>;

impl MemLogError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a new sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        Self::SinkError {
            source: SinkError::Generic(msg.into()),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::IoError { .. } => true,
            Self::SinkError { .. } => true,
            Self::InvalidName => false,
            Self::InternalError(_) => false,
            _ => false,
        }
    }

    /// Get the error category for logging purposes
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidName => "registry",
            Self::ConfigError(_) | Self::ConfigFileMissing(_) | Self::InvalidLogLevel(_) => {
                "config"
            }
            Self::ValidationError(_) => "validation",
            Self::IoError { .. } => "io",
            Self::SerializationError { .. } => "serialization",
            Self::TomlError { .. } => "toml",
            Self::SinkError { .. } => "sink",
            Self::InternalError(_) => "internal",
        }
    }
}
