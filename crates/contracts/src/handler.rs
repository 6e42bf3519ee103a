//! Handler and closer capability traits
//!
//! The batcher drives these from its single drain worker; implementations
//! never need to be re-entrant.

use async_trait::async_trait;

use crate::{ErrorRecord, SinkError};

/// Handler capability
///
/// Invoked exactly once per drained record, in queue order, by the drain
/// worker. Implementations must not retain the record beyond the call.
#[async_trait]
pub trait ErrorHandler: Send {
    /// Process one record
    ///
    /// # Errors
    /// A returned error is logged by the worker and otherwise swallowed;
    /// the record counts as processed either way.
    async fn handle(&mut self, record: &ErrorRecord) -> Result<(), SinkError>;
}

/// Closer capability
///
/// Invoked exactly once at shutdown, after the drain worker has finished
/// or timed out.
#[async_trait]
pub trait ErrorCloser: Send {
    /// Release whatever the handler side holds open
    async fn close(&mut self) -> Result<(), SinkError>;
}

/// Adapts a plain closure into an [`ErrorHandler`]
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<F> ErrorHandler for FnHandler<F>
where
    F: FnMut(&ErrorRecord) -> Result<(), SinkError> + Send,
{
    async fn handle(&mut self, record: &ErrorRecord) -> Result<(), SinkError> {
        (self.0)(record)
    }
}

/// Adapts a plain closure into an [`ErrorCloser`]
pub struct FnCloser<F>(pub F);

#[async_trait]
impl<F> ErrorCloser for FnCloser<F>
where
    F: FnMut() -> Result<(), SinkError> + Send,
{
    async fn close(&mut self) -> Result<(), SinkError> {
        (self.0)()
    }
}
