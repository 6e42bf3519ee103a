//! Batcher error types

use thiserror::Error;

use contracts::SinkError;

/// Batcher-specific errors
///
/// Only two failure kinds ever reach a caller synchronously: a rejected
/// configuration at construction time and a failed closer at shutdown.
#[derive(Debug, Error)]
pub enum BatcherError {
    /// Configuration rejected at construction time
    #[error("invalid sink configuration: {source}")]
    InvalidConfig {
        #[source]
        source: SinkError,
    },

    /// The closer capability failed during shutdown
    #[error("sink close failed: {source}")]
    Close {
        #[source]
        source: SinkError,
    },
}

impl BatcherError {
    /// Wrap a configuration error
    pub fn invalid_config(source: SinkError) -> Self {
        Self::InvalidConfig { source }
    }

    /// Wrap a closer failure
    pub fn close(source: SinkError) -> Self {
        Self::Close { source }
    }
}
