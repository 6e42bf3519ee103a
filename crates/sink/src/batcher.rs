//! Batcher - bounded error collection with a single drain worker
//!
//! Submission is synchronous and never blocks: a full queue drops the
//! record. Shutdown is two-phase: signal the worker, then wait for its
//! drain-to-empty pass bounded by the configured close timeout.

use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use contracts::{ErrorCloser, ErrorHandler, ErrorRecord, SinkConfig, SinkError, SinkMeta};

use crate::error::BatcherError;
use crate::metrics::SinkMetrics;

/// Builder for creating a [`Batcher`]
///
/// The handler capability is mandatory; building without one fails with an
/// invalid-configuration error. The closer capability is optional.
pub struct BatcherBuilder {
    config: SinkConfig,
    handler: Option<Box<dyn ErrorHandler>>,
    closer: Option<Box<dyn ErrorCloser>>,
}

impl BatcherBuilder {
    /// Start a builder from the given configuration
    pub fn new(config: SinkConfig) -> Self {
        Self {
            config,
            handler: None,
            closer: None,
        }
    }

    /// Supply the handler capability
    pub fn handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Supply the handler as a plain closure
    pub fn handler_fn<F>(self, f: F) -> Self
    where
        F: FnMut(&ErrorRecord) -> Result<(), SinkError> + Send + 'static,
    {
        self.handler(contracts::FnHandler(f))
    }

    /// Supply the closer capability
    pub fn closer(mut self, closer: impl ErrorCloser + 'static) -> Self {
        self.closer = Some(Box::new(closer));
        self
    }

    /// Supply the closer as a plain closure
    pub fn closer_fn<F>(self, f: F) -> Self
    where
        F: FnMut() -> Result<(), SinkError> + Send + 'static,
    {
        self.closer(contracts::FnCloser(f))
    }

    /// Validate the configuration and start the batcher
    ///
    /// Spawns the drain worker before returning; must be called from within
    /// a tokio runtime.
    ///
    /// # Errors
    /// [`BatcherError::InvalidConfig`] when the handler is missing or the
    /// configuration fails validation.
    pub fn build(self) -> Result<Batcher, BatcherError> {
        self.config
            .validate()
            .map_err(BatcherError::invalid_config)?;
        let handler = self.handler.ok_or_else(|| {
            BatcherError::invalid_config(SinkError::config_validation(
                "handler",
                "handler capability is required",
            ))
        })?;
        Ok(Batcher::spawn(self.config, handler, self.closer))
    }
}

/// Bounded, non-blocking error sink
///
/// Shared by reference between any number of submitter tasks. Mutated only
/// by submissions, the drain worker, and the one-way close transition.
pub struct Batcher {
    /// Queue write side; the slot doubles as the Closed flag (None = closed)
    tx: RwLock<Option<mpsc::Sender<ErrorRecord>>>,
    /// Shutdown signal shared with the drain worker
    cancel: CancellationToken,
    /// Worker task handle, taken by the first close
    worker: Mutex<Option<JoinHandle<()>>>,
    /// Closer capability, taken by the first close
    closer: Mutex<Option<Box<dyn ErrorCloser>>>,
    /// Shared counters
    metrics: Arc<SinkMetrics>,
    config: SinkConfig,
}

impl Batcher {
    fn spawn(
        config: SinkConfig,
        handler: Box<dyn ErrorHandler>,
        closer: Option<Box<dyn ErrorCloser>>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(config.max_batch_size);
        let cancel = CancellationToken::new();
        let metrics = Arc::new(SinkMetrics::new());

        let worker = tokio::spawn(drain_worker(
            handler,
            rx,
            cancel.clone(),
            Arc::clone(&metrics),
        ));

        Self {
            tx: RwLock::new(Some(tx)),
            cancel,
            worker: Mutex::new(Some(worker)),
            closer: Mutex::new(closer),
            metrics,
            config,
        }
    }

    /// Submit an error with empty metadata (non-blocking)
    pub fn submit(&self, error: impl Into<anyhow::Error>) {
        self.submit_with_meta(error, SinkMeta::new());
    }

    /// Submit an error with metadata (non-blocking)
    ///
    /// Returns immediately in every case: after close this is a no-op, and
    /// a full queue drops the record instead of waiting for the worker.
    pub fn submit_with_meta(&self, error: impl Into<anyhow::Error>, meta: SinkMeta) {
        let guard = self.tx.read().expect("sender lock poisoned");
        let Some(tx) = guard.as_ref() else {
            // Already closed
            return;
        };
        if self.cancel.is_cancelled() {
            // Shutdown raced the submission; bias toward not enqueueing
            return;
        }

        let record = ErrorRecord::new(error.into(), meta);
        match tx.try_send(record) {
            Ok(()) => {
                self.metrics.record_submitted();
                self.metrics
                    .update_queue_len(tx.max_capacity() - tx.capacity());
            }
            Err(mpsc::error::TrySendError::Full(record)) => {
                self.metrics.record_dropped();
                warn!(
                    capacity = self.config.max_batch_size,
                    error = %record.error,
                    "sink queue full, error dropped"
                );
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!("sink queue closed, error discarded");
            }
        }
    }

    /// True once the first close call has marked the batcher closed
    pub fn is_closed(&self) -> bool {
        self.tx.read().expect("sender lock poisoned").is_none()
    }

    /// Get current counters
    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Get the configuration the batcher was built from
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Shut the batcher down
    ///
    /// Idempotent: the first call performs the shutdown, every later call
    /// is a no-op returning Ok. Waits for the drain worker up to the
    /// configured close timeout, then invokes the closer if one was
    /// supplied.
    ///
    /// # Errors
    /// Only a failed closer is surfaced; a drain timeout is logged and
    /// swallowed.
    #[instrument(name = "batcher_close", skip(self))]
    pub async fn close(&self) -> Result<(), BatcherError> {
        let tx = self.tx.write().expect("sender lock poisoned").take();
        let Some(tx) = tx else {
            // Already closed
            return Ok(());
        };

        self.cancel.cancel();
        // No further enqueue is structurally possible past this point
        drop(tx);

        let worker = self.worker.lock().expect("worker lock poisoned").take();
        if let Some(worker) = worker {
            match tokio::time::timeout(self.config.close_timeout(), worker).await {
                Ok(Ok(())) => debug!("drain worker finished"),
                Ok(Err(e)) => warn!(error = %e, "drain worker task failed"),
                Err(_) => warn!(
                    timeout_ms = self.config.close_timeout_ms,
                    "close timed out waiting for drain, records may be unprocessed"
                ),
            }
        }

        let closer = self.closer.lock().expect("closer lock poisoned").take();
        if let Some(mut closer) = closer {
            closer.close().await.map_err(BatcherError::close)?;
        }
        Ok(())
    }
}

/// Worker task that drains queued records through the handler
async fn drain_worker(
    mut handler: Box<dyn ErrorHandler>,
    mut rx: mpsc::Receiver<ErrorRecord>,
    cancel: CancellationToken,
    metrics: Arc<SinkMetrics>,
) {
    debug!("drain worker started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            next = rx.recv() => match next {
                Some(record) => {
                    metrics.update_queue_len(rx.len());
                    handle_record(handler.as_mut(), &record, &metrics).await;
                }
                None => break,
            },
        }
    }

    // Drain-to-empty: process what is already queued, never wait for more
    let mut drained = 0usize;
    while let Ok(record) = rx.try_recv() {
        handle_record(handler.as_mut(), &record, &metrics).await;
        drained += 1;
    }
    if drained > 0 {
        debug!(drained, "processed remaining records on shutdown");
    }

    debug!("drain worker stopped");
}

async fn handle_record(
    handler: &mut dyn ErrorHandler,
    record: &ErrorRecord,
    metrics: &SinkMetrics,
) {
    match handler.handle(record).await {
        Ok(()) => metrics.record_handled(),
        Err(e) => {
            metrics.record_failed();
            warn!(
                error = %e,
                submitted = %record.error,
                "error handler failed"
            );
            // Continue draining - a record counts as processed either way
        }
    }
}
