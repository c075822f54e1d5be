// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processor and consumer loop lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Processor start, fatal startup errors and shutdown
//! * Consumer loop start and termination
//! * Per-message dispatch
//! * Adapter connection release

use crate::engine::LoopExit;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Processor is about to launch its consumer loops.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use metricsworker::observability::messages::engine::ProcessorStarting;
/// use std::time::Duration;
///
/// let msg = ProcessorStarting {
///     adapter: "lines",
///     concurrency: 2,
///     wait_timeout: Duration::from_millis(500),
///     worker_count: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ProcessorStarting<'a> {
    pub adapter: &'a str,
    pub concurrency: usize,
    pub wait_timeout: Duration,
    pub worker_count: usize,
}

impl Display for ProcessorStarting<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting processor on '{}' adapter: {} consumer loops, {} workers, waiting up to {:?} for tasks",
            self.adapter, self.concurrency, self.worker_count, self.wait_timeout
        )
    }
}

impl StructuredLog for ProcessorStarting<'_> {
    fn log(&self) {
        tracing::info!(
            adapter = self.adapter,
            concurrency = self.concurrency,
            worker_count = self.worker_count,
            wait_timeout_ms = self.wait_timeout.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "processor",
            span_name = name,
            adapter = self.adapter,
            concurrency = self.concurrency,
            worker_count = self.worker_count,
        )
    }
}

/// Every consumer loop has terminated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ProcessorFinished<'a> {
    pub adapter: &'a str,
    pub messages_processed: u64,
    pub worker_failures: u64,
    pub duration: Duration,
}

impl Display for ProcessorFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor on '{}' adapter finished: {} messages, {} worker failures in {:?}",
            self.adapter, self.messages_processed, self.worker_failures, self.duration
        )
    }
}

impl StructuredLog for ProcessorFinished<'_> {
    fn log(&self) {
        tracing::info!(
            adapter = self.adapter,
            messages_processed = self.messages_processed,
            worker_failures = self.worker_failures,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "processor_finished",
            span_name = name,
            adapter = self.adapter,
            messages_processed = self.messages_processed,
            duration = ?self.duration,
        )
    }
}

/// A fatal error stopped `start` before any consumer loop ran.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use metricsworker::observability::messages::engine::ProcessorStartFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "connection refused");
/// let msg = ProcessorStartFailed {
///     adapter: "lines",
///     stage: "open",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ProcessorStartFailed<'a> {
    pub adapter: &'a str,
    pub stage: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ProcessorStartFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor on '{}' adapter failed during {}: {}",
            self.adapter, self.stage, self.error
        )
    }
}

impl StructuredLog for ProcessorStartFailed<'_> {
    fn log(&self) {
        tracing::error!(
            adapter = self.adapter,
            stage = self.stage,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "processor_start_failed",
            span_name = name,
            adapter = self.adapter,
            stage = self.stage,
            error = %self.error,
        )
    }
}

/// Releasing the adapter connection failed.
///
/// # Log Level
/// `warn!` - The run's result is already decided; nothing left to recover
pub struct AdapterCloseFailed<'a> {
    pub adapter: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for AdapterCloseFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to close '{}' adapter: {}", self.adapter, self.error)
    }
}

impl StructuredLog for AdapterCloseFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            adapter = self.adapter,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "adapter_close_failed",
            span_name = name,
            adapter = self.adapter,
            error = %self.error,
        )
    }
}

/// A consumer loop began listening.
///
/// # Log Level
/// `debug!` - One per loop
pub struct ConsumerLoopStarted {
    pub loop_id: usize,
}

impl Display for ConsumerLoopStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Consumer loop {} listening for tasks", self.loop_id)
    }
}

impl StructuredLog for ConsumerLoopStarted {
    fn log(&self) {
        tracing::debug!(loop_id = self.loop_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("consumer_loop", span_name = name, loop_id = self.loop_id)
    }
}

/// A consumer loop reached its terminal state.
///
/// # Log Level
/// `debug!` - One per loop
pub struct ConsumerLoopExited {
    pub loop_id: usize,
    pub reason: LoopExit,
    pub messages_processed: u64,
}

impl Display for ConsumerLoopExited {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Consumer loop {} terminated ({}) after {} messages",
            self.loop_id, self.reason, self.messages_processed
        )
    }
}

impl StructuredLog for ConsumerLoopExited {
    fn log(&self) {
        tracing::debug!(
            loop_id = self.loop_id,
            reason = %self.reason,
            messages_processed = self.messages_processed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "consumer_loop_exited",
            span_name = name,
            loop_id = self.loop_id,
            reason = %self.reason,
        )
    }
}

/// A message was received and fanned out.
///
/// # Log Level
/// `trace!` - Per message
pub struct MessageDispatched {
    pub loop_id: usize,
    pub worker_count: usize,
    pub payload_size: usize,
}

impl Display for MessageDispatched {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Consumer loop {} dispatching {} byte task to {} workers",
            self.loop_id, self.payload_size, self.worker_count
        )
    }
}

impl StructuredLog for MessageDispatched {
    fn log(&self) {
        tracing::trace!(
            loop_id = self.loop_id,
            worker_count = self.worker_count,
            payload_size = self.payload_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "dispatch",
            span_name = name,
            loop_id = self.loop_id,
            worker_count = self.worker_count,
        )
    }
}

/// A consumer loop task ended abnormally; the remaining loops keep running.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ConsumerLoopAborted<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for ConsumerLoopAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Consumer loop aborted: {}", self.error)
    }
}

impl StructuredLog for ConsumerLoopAborted<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("consumer_loop_aborted", span_name = name, error = %self.error)
    }
}
