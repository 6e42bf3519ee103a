//! # Sink
//!
//! Bounded, non-blocking error collection.
//!
//! Responsibilities:
//! - Accept error+metadata pairs from any number of caller tasks
//! - Buffer them in a fixed-capacity queue, dropping on overflow
//! - Drain sequentially through a single worker and a caller-supplied handler
//! - Close gracefully within a configured time bound
//!
//! A saturated or slow handler never blocks application code; overload is
//! resolved by dropping records and counting the drops.

pub mod batcher;
pub mod error;
pub mod handlers;
pub mod metrics;

pub use batcher::{Batcher, BatcherBuilder};
pub use contracts::{
    ErrorCloser, ErrorHandler, ErrorRecord, SinkConfig, SinkError, SinkMeta, SinkStats,
};
pub use error::BatcherError;
pub use handlers::LogHandler;
pub use metrics::SinkMetrics;
