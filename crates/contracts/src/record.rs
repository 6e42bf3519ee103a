//! ErrorRecord - the unit of work flowing through the sink
//!
//! Pairs one error value with its structured metadata.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One submitted error together with its metadata
#[derive(Debug)]
pub struct ErrorRecord {
    /// The submitted error value
    pub error: anyhow::Error,

    /// Structured context attached at submission time
    pub meta: SinkMeta,
}

impl ErrorRecord {
    /// Pair an error with its metadata
    pub fn new(error: anyhow::Error, meta: SinkMeta) -> Self {
        Self { error, meta }
    }
}

/// Structured context attached to one submitted error
///
/// Built with the consuming builder methods; conflicting calls resolve
/// last-applied-wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SinkMeta {
    /// Optional machine-readable error code
    pub code: Option<String>,

    /// Open-ended key/value context (last write wins per key)
    #[serde(default)]
    pub values: HashMap<String, serde_json::Value>,
}

impl SinkMeta {
    /// Empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error code
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Insert a single key/value pair
    pub fn value(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Replace the whole value mapping, discarding previously set pairs
    pub fn values(mut self, values: HashMap<String, serde_json::Value>) -> Self {
        self.values = values;
        self
    }

    /// True when neither code nor values are set
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.values.is_empty()
    }
}
