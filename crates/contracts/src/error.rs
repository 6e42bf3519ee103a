//! Layered error definitions
//!
//! Categorized by source: config / handler / close

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum SinkError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Handler Errors =====
    /// Handler rejected a record
    #[error("handler error: {message}")]
    Handler { message: String },

    // ===== Close Errors =====
    /// Closer failed during shutdown
    #[error("close error: {message}")]
    Close { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl SinkError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create handler error
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
        }
    }

    /// Create close error
    pub fn close(message: impl Into<String>) -> Self {
        Self::Close {
            message: message.into(),
        }
    }
}
