// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Adapter and worker implementations for the metrics worker.
//!
//! # Available Backends
//!
//! ## Adapters
//! Message sources implementing the `Adapter` trait:
//! - **Memory**: replays a fixed list of messages; lifecycle failures can be injected
//! - **Lines**: newline-delimited payloads from a file or stdin
//!
//! ## Metrics Workers
//! Workers that decode a `CountMetric` from each delivery and record it:
//! - **distinct_name**: time-scored event index (key-value store stand-in)
//! - **hourly_log**: document collection, last hour only
//! - **account_name**: account table with insert-if-absent semantics
//! - **log**: logs the raw body, writes nothing
//!
//! ## Stub Backend (Test-Only)
//! Testing utilities for engine development (only available in test builds):
//! - **StubWorker**: succeeds, optionally after a delay, and records each task
//! - **FailingWorker**: always returns an error
//! - **PanickingWorker**: panics mid-task
//!
//! # Architecture
//!
//! ```text
//! Configuration → WorkerFactory → Arc<dyn Worker> → Processor registry
//! ```
//!
//! # Examples
//!
//! ```rust
//! use metricsworker::backends::metrics::{MetricStores, WorkerFactory};
//! use metricsworker::config::WorkerConfig;
//!
//! let config = WorkerConfig {
//!     id: "accountName".to_string(),
//!     kind: "account_name".to_string(),
//! };
//!
//! let worker = WorkerFactory::create_worker(&config, &MetricStores::in_memory())?;
//! assert_eq!(worker.name(), "account_name");
//! # Ok::<(), String>(())
//! ```

pub mod adapters;
pub mod metrics;
#[cfg(test)]
pub mod stub;
