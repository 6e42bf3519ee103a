//! Sink counters for observability

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use contracts::SinkStats;

/// Counters for a single batcher
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Current queue length (approximate)
    queue_len: AtomicUsize,
    /// Records accepted into the queue
    submitted_count: AtomicU64,
    /// Records successfully processed by the handler
    handled_count: AtomicU64,
    /// Handler invocations that returned an error
    failed_count: AtomicU64,
    /// Records dropped because the queue was full
    dropped_count: AtomicU64,
}

impl SinkMetrics {
    /// Create new counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue length
    pub fn queue_len(&self) -> usize {
        self.queue_len.load(Ordering::Relaxed)
    }

    /// Update queue length
    pub fn update_queue_len(&self, len: usize) {
        self.queue_len.store(len, Ordering::Relaxed);
    }

    /// Accepted record count
    pub fn submitted_count(&self) -> u64 {
        self.submitted_count.load(Ordering::Relaxed)
    }

    /// Record an accepted submission
    pub fn record_submitted(&self) {
        self.submitted_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Successfully handled record count
    pub fn handled_count(&self) -> u64 {
        self.handled_count.load(Ordering::Relaxed)
    }

    /// Record a successful handler invocation
    pub fn record_handled(&self) {
        self.handled_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Failed handler invocation count
    pub fn failed_count(&self) -> u64 {
        self.failed_count.load(Ordering::Relaxed)
    }

    /// Record a failed handler invocation
    pub fn record_failed(&self) {
        self.failed_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Overflow drop count
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    /// Record an overflow drop
    pub fn record_dropped(&self) {
        self.dropped_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters
    pub fn snapshot(&self) -> SinkStats {
        SinkStats {
            queue_len: self.queue_len(),
            submitted_count: self.submitted_count(),
            handled_count: self.handled_count(),
            failed_count: self.failed_count(),
            dropped_count: self.dropped_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = SinkMetrics::new();
        metrics.record_submitted();
        metrics.record_submitted();
        metrics.record_handled();
        metrics.record_dropped();
        metrics.update_queue_len(1);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.submitted_count, 2);
        assert_eq!(snapshot.handled_count, 1);
        assert_eq!(snapshot.failed_count, 0);
        assert_eq!(snapshot.dropped_count, 1);
        assert_eq!(snapshot.queue_len, 1);
    }
}
