//! Sink metric recorders
//!
//! Thin wrappers over the `metrics` facade; no-ops until a recorder is
//! installed via [`crate::init`] or [`crate::init_metrics_only`].

use contracts::SinkStats;
use metrics::{counter, gauge};

/// Record one accepted submission
pub fn record_error_submitted() {
    counter!("error_sink_submitted_total").increment(1);
}

/// Record one successfully handled record
pub fn record_error_handled() {
    counter!("error_sink_handled_total").increment(1);
}

/// Record one failed handler invocation
pub fn record_handler_failure() {
    counter!("error_sink_handler_failures_total").increment(1);
}

/// Record overflow drops
pub fn record_error_dropped(count: u64) {
    if count > 0 {
        counter!("error_sink_dropped_total").increment(count);
    }
}

/// Record the current queue length
pub fn record_queue_len(len: usize) {
    gauge!("error_sink_queue_len").set(len as f64);
}

/// Publish a full counter snapshot
///
/// Call after shutdown (or periodically) to push the batcher's counters to
/// the exporter.
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_sink_snapshot;
///
/// record_sink_snapshot(&batcher.metrics().snapshot());
/// ```
pub fn record_sink_snapshot(stats: &SinkStats) {
    gauge!("error_sink_submitted_count").set(stats.submitted_count as f64);
    gauge!("error_sink_handled_count").set(stats.handled_count as f64);
    gauge!("error_sink_failed_count").set(stats.failed_count as f64);
    gauge!("error_sink_dropped_count").set(stats.dropped_count as f64);
    record_queue_len(stats.queue_len);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorders_are_safe_without_exporter() {
        // The metrics facade drops records when no recorder is installed
        record_error_submitted();
        record_error_handled();
        record_handler_failure();
        record_error_dropped(0);
        record_error_dropped(3);
        record_sink_snapshot(&SinkStats::default());
    }
}
