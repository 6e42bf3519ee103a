//! # Integration Tests
//!
//! End-to-end coverage of the public surface.
//!
//! Covers:
//! - contract snapshot checks
//! - config file -> batcher -> submit -> close pipelines
//! - concurrency behavior under saturation

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let config = contracts::SinkConfig::default();
        assert_eq!(config.max_batch_size, 100);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    use async_trait::async_trait;
    use contracts::{ErrorCloser, ErrorHandler, ErrorRecord, SinkConfig, SinkError};
    use config_loader::{ConfigFormat, ConfigLoader};
    use sink::BatcherBuilder;
    use tokio::time::{sleep, Duration};

    /// Handler counting every record it sees, with an optional delay
    struct CountingHandler {
        handled: Arc<AtomicU64>,
        delay_ms: u64,
    }

    #[async_trait]
    impl ErrorHandler for CountingHandler {
        async fn handle(&mut self, _record: &ErrorRecord) -> Result<(), SinkError> {
            if self.delay_ms > 0 {
                sleep(Duration::from_millis(self.delay_ms)).await;
            }
            self.handled.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    /// Closer counting its invocations
    struct CountingCloser {
        closed: Arc<AtomicU64>,
    }

    #[async_trait]
    impl ErrorCloser for CountingCloser {
        async fn close(&mut self) -> Result<(), SinkError> {
            self.closed.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    /// End-to-end: config string -> batcher -> concurrent submitters -> close
    ///
    /// Verifies the complete flow:
    /// 1. ConfigLoader parses and validates the sink configuration
    /// 2. Concurrent tasks submit without coordination
    /// 3. close() drains everything and runs the closer exactly once
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_e2e_concurrent_submit_and_close() {
        let config =
            ConfigLoader::load_from_str("max_batch_size = 256", ConfigFormat::Toml).unwrap();

        let handled = Arc::new(AtomicU64::new(0));
        let closed = Arc::new(AtomicU64::new(0));

        let batcher = Arc::new(
            BatcherBuilder::new(config)
                .handler(CountingHandler {
                    handled: Arc::clone(&handled),
                    delay_ms: 0,
                })
                .closer(CountingCloser {
                    closed: Arc::clone(&closed),
                })
                .build()
                .unwrap(),
        );

        let mut submitters = Vec::new();
        for task in 0..4u32 {
            let batcher = Arc::clone(&batcher);
            submitters.push(tokio::spawn(async move {
                for i in 0..25u32 {
                    batcher.submit(anyhow::anyhow!("task {task} error {i}"));
                }
            }));
        }
        for submitter in submitters {
            submitter.await.unwrap();
        }

        batcher.close().await.unwrap();

        assert_eq!(handled.load(Ordering::Relaxed), 100);
        assert_eq!(closed.load(Ordering::Relaxed), 1);
        assert_eq!(batcher.metrics().dropped_count(), 0);

        // Publishing the final counters must work with no exporter installed
        observability::record_sink_snapshot(&batcher.metrics().snapshot());
    }

    /// Saturation must never block submitters, whatever the handler does
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_e2e_submit_never_blocks_under_saturation() {
        let handled = Arc::new(AtomicU64::new(0));
        let config = SinkConfig {
            max_batch_size: 2,
            close_timeout_ms: 100,
        };
        let batcher = Arc::new(
            BatcherBuilder::new(config)
                .handler(CountingHandler {
                    handled: Arc::clone(&handled),
                    delay_ms: 30_000, // effectively blocked
                })
                .build()
                .unwrap(),
        );

        let start = Instant::now();
        let mut submitters = Vec::new();
        for task in 0..4u32 {
            let batcher = Arc::clone(&batcher);
            submitters.push(tokio::spawn(async move {
                for i in 0..25u32 {
                    batcher.submit(anyhow::anyhow!("task {task} error {i}"));
                }
            }));
        }
        for submitter in submitters {
            submitter.await.unwrap();
        }

        assert!(
            start.elapsed() < Duration::from_secs(1),
            "100 submissions against a blocked handler must return promptly"
        );
        assert!(batcher.metrics().dropped_count() > 0);

        batcher.close().await.unwrap();
    }

    /// A slow handler sheds load by dropping, not by queueing unboundedly
    #[tokio::test]
    async fn test_e2e_slow_handler_drops_overflow() {
        let handled = Arc::new(AtomicU64::new(0));
        let config = SinkConfig {
            max_batch_size: 2,
            close_timeout_ms: 5_000,
        };
        let batcher = BatcherBuilder::new(config)
            .handler(CountingHandler {
                handled: Arc::clone(&handled),
                delay_ms: 50,
            })
            .build()
            .unwrap();

        for i in 0..10u32 {
            batcher.submit(anyhow::anyhow!("error {i}"));
        }
        batcher.close().await.unwrap();

        let processed = handled.load(Ordering::Relaxed);
        assert!(processed < 10, "expected drops, processed {processed}");
        assert_eq!(
            batcher.metrics().submitted_count() + batcher.metrics().dropped_count(),
            10
        );
    }

    /// Config file on disk drives a working pipeline
    #[tokio::test]
    async fn test_e2e_config_file_pipeline() {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(b"max_batch_size = 32\nclose_timeout_ms = 1000\n")
            .unwrap();

        let config = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(config.max_batch_size, 32);

        let handled = Arc::new(AtomicU64::new(0));
        let batcher = BatcherBuilder::new(config)
            .handler(CountingHandler {
                handled: Arc::clone(&handled),
                delay_ms: 0,
            })
            .build()
            .unwrap();

        for i in 0..5u32 {
            batcher.submit(anyhow::anyhow!("error {i}"));
        }
        batcher.close().await.unwrap();

        assert_eq!(handled.load(Ordering::Relaxed), 5);
    }
}
