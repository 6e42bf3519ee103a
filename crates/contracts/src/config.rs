//! Sink configuration contract shared across crates.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::SinkError;

/// Error sink configuration
///
/// Immutable once a batcher has been constructed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Capacity of the internal record queue
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Bound on the graceful drain during shutdown, in milliseconds
    #[serde(default = "default_close_timeout_ms")]
    pub close_timeout_ms: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
            close_timeout_ms: default_close_timeout_ms(),
        }
    }
}

fn default_max_batch_size() -> usize {
    100
}

fn default_close_timeout_ms() -> u64 {
    5_000
}

impl SinkConfig {
    /// Create a configuration with explicit values
    pub fn new(max_batch_size: usize, close_timeout: Duration) -> Self {
        Self {
            max_batch_size,
            close_timeout_ms: close_timeout.as_millis() as u64,
        }
    }

    /// Close timeout as a [`Duration`]
    pub fn close_timeout(&self) -> Duration {
        Duration::from_millis(self.close_timeout_ms)
    }

    /// Validate field ranges
    ///
    /// Returns the first error encountered, or Ok(()).
    pub fn validate(&self) -> Result<(), SinkError> {
        if self.max_batch_size == 0 {
            return Err(SinkError::config_validation(
                "max_batch_size",
                "must be >= 1",
            ));
        }
        if self.close_timeout_ms == 0 {
            return Err(SinkError::config_validation(
                "close_timeout_ms",
                "must be >= 1",
            ));
        }
        Ok(())
    }
}
