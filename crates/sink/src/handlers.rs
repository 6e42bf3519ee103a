//! LogHandler - routes records to tracing

use async_trait::async_trait;
use tracing::error;

use contracts::{ErrorHandler, ErrorRecord, SinkError};

/// Handler that logs each record
///
/// Useful as a default sink backend and in demos.
pub struct LogHandler {
    name: String,
}

impl LogHandler {
    /// Create a new LogHandler with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Handler name (used in log fields)
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl ErrorHandler for LogHandler {
    async fn handle(&mut self, record: &ErrorRecord) -> Result<(), SinkError> {
        error!(
            sink = %self.name,
            code = record.meta.code.as_deref().unwrap_or(""),
            values = record.meta.values.len(),
            error = %record.error,
            "error received"
        );
        Ok(())
    }
}
