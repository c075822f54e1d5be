// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{anyhow, Context};
use std::env;
use std::time::Instant;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use metricsworker::backends::metrics::MetricStores;
use metricsworker::config::{load_and_validate_config, RuntimeBuilder};

/// Install the process-wide subscriber, honouring `RUST_LOG` and falling back to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <config.yaml|config.toml>", args[0]);
        eprintln!("Example: {} configs/metrics-worker.yaml", args[0]);
        std::process::exit(1);
    }
    let config_file = &args[1];

    let config = load_and_validate_config(config_file)
        .with_context(|| format!("failed to load config '{}'", config_file))?;

    let shutdown = CancellationToken::new();
    let options = config
        .processor
        .to_options()
        .with_shutdown_token(shutdown.clone());
    let stores = MetricStores::in_memory();
    let processor = RuntimeBuilder::from_config_with_options(&config, &stores, options)
        .map_err(|e| anyhow!(e))
        .context("failed to build runtime")?;

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received; shutting down consumer loops");
            shutdown.cancel();
        }
    });

    tracing::info!(
        config = %config_file,
        workers = ?processor.worker_ids(),
        "Waiting for tasks for {}ms",
        config.processor.wait_timeout_ms
    );

    let started = Instant::now();
    processor
        .start()
        .await
        .context("processor failed to start")?;

    let stats = processor.stats();
    tracing::info!(
        messages_processed = stats.messages_processed,
        worker_failures = stats.worker_failures,
        loops_closed = stats.loops_closed,
        loops_idle_timeout = stats.loops_idle_timeout,
        loops_cancelled = stats.loops_cancelled,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Processor finished"
    );

    Ok(())
}
