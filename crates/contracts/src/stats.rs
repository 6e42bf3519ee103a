//! Snapshot of sink counters shared across crates.

/// Point-in-time view of a batcher's counters
#[derive(Debug, Clone, Copy, Default)]
pub struct SinkStats {
    /// Queue length at snapshot time (approximate)
    pub queue_len: usize,
    /// Records accepted into the queue
    pub submitted_count: u64,
    /// Records successfully processed by the handler
    pub handled_count: u64,
    /// Handler invocations that returned an error
    pub failed_count: u64,
    /// Records dropped because the queue was full
    pub dropped_count: u64,
}
