//! Error Pipeline Example
//!
//! Demonstrates the full flow: load a sink configuration, start a batcher
//! with a logging handler, submit a burst of errors from several tasks,
//! then close gracefully and publish the final counters.
//!
//! Run with: cargo run --bin error_pipeline [config.toml]

use std::sync::Arc;

use config_loader::ConfigLoader;
use contracts::{SinkConfig, SinkMeta};
use observability::{LogFormat, ObservabilityConfig};
use serde_json::json;
use sink::{BatcherBuilder, LogHandler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::init_with_config(ObservabilityConfig {
        log_format: LogFormat::Pretty,
        metrics_port: None,
        default_log_level: "info".to_string(),
    })?;

    tracing::info!("Starting Error Pipeline Demo");

    // ==== Stage 1: Use default config or load from file ====
    let config = if let Some(path) = std::env::args().nth(1) {
        tracing::info!(path = %path, "Loading sink config");
        ConfigLoader::load_from_path(std::path::Path::new(&path))?
    } else {
        SinkConfig::default()
    };

    tracing::info!(
        max_batch_size = config.max_batch_size,
        close_timeout_ms = config.close_timeout_ms,
        "Sink configured"
    );

    // ==== Stage 2: Start the batcher ====
    let batcher = Arc::new(
        BatcherBuilder::new(config)
            .handler(LogHandler::new("demo"))
            .closer_fn(|| {
                tracing::info!("demo closer invoked");
                Ok(())
            })
            .build()?,
    );

    // ==== Stage 3: Submit a burst from several tasks ====
    let mut producers = Vec::new();
    for task in 0..3u32 {
        let batcher = Arc::clone(&batcher);
        producers.push(tokio::spawn(async move {
            for i in 0..5u32 {
                batcher.submit_with_meta(
                    anyhow::anyhow!("simulated failure {i} from task {task}"),
                    SinkMeta::new()
                        .code(format!("DEMO-{task}"))
                        .value("attempt", json!(i)),
                );
            }
        }));
    }
    for producer in producers {
        producer.await?;
    }

    // ==== Stage 4: Shutdown and report ====
    tracing::info!("Closing the sink...");
    batcher.close().await?;

    let stats = batcher.metrics().snapshot();
    observability::record_sink_snapshot(&stats);
    tracing::info!(
        submitted = stats.submitted_count,
        handled = stats.handled_count,
        failed = stats.failed_count,
        dropped = stats.dropped_count,
        "Pipeline completed"
    );

    Ok(())
}
