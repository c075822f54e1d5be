// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging in the metrics worker. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep field names consistent between the human-readable line and structured fields
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - Processor and consumer loop lifecycle events
//! * `messages::worker` - Worker registration and per-task failure events
//! * `messages::validation` - Configuration validation errors
//!
//! # Sinks
//!
//! The library only emits `tracing` events. Where they end up is decided by the
//! subscriber: either the process-wide one installed by the binary or a
//! `tracing::Dispatch` injected through
//! [`ProcessorOptions::with_logger`](crate::config::ProcessorOptions::with_logger).
//!
//! # Usage
//!
//! ```rust
//! use metricsworker::observability::messages::{worker::TaskFailed, StructuredLog};
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "connection refused");
//! TaskFailed {
//!     worker_id: "hourlyLog",
//!     error: &error,
//! }
//! .log();
//! ```

pub mod messages;
