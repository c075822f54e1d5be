// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for worker registration and per-task outcomes.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A worker failed to execute a task. There is no automatic retry.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use metricsworker::observability::messages::worker::TaskFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "store unavailable");
/// let msg = TaskFailed {
///     worker_id: "accountName",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct TaskFailed<'a> {
    pub worker_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TaskFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to execute task for worker id '{}' (failed once, will not auto-retry): {}",
            self.worker_id, self.error
        )
    }
}

impl StructuredLog for TaskFailed<'_> {
    fn log(&self) {
        tracing::error!(
            worker_id = self.worker_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "task_failed",
            span_name = name,
            worker_id = self.worker_id,
            error = %self.error,
        )
    }
}

/// The default failure handler saw a failed outcome.
///
/// # Log Level
/// `debug!`
pub struct FailedTaskHandled<'a> {
    pub worker_id: &'a str,
}

impl Display for FailedTaskHandled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Handling failed task for worker id '{}'", self.worker_id)
    }
}

impl StructuredLog for FailedTaskHandled<'_> {
    fn log(&self) {
        tracing::debug!(worker_id = self.worker_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("failed_task", span_name = name, worker_id = self.worker_id)
    }
}

/// A worker was bound to an identifier.
///
/// # Log Level
/// `debug!`, or `warn!` when an existing binding was replaced
pub struct WorkerRegistered<'a> {
    pub worker_id: &'a str,
    pub worker_name: &'a str,
    pub replaced: bool,
}

impl Display for WorkerRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.replaced {
            write!(
                f,
                "Worker id '{}' re-registered, now bound to '{}'",
                self.worker_id, self.worker_name
            )
        } else {
            write!(
                f,
                "Registered '{}' worker as '{}'",
                self.worker_name, self.worker_id
            )
        }
    }
}

impl StructuredLog for WorkerRegistered<'_> {
    fn log(&self) {
        if self.replaced {
            tracing::warn!(
                worker_id = self.worker_id,
                worker_name = self.worker_name,
                "{}", self
            );
        } else {
            tracing::debug!(
                worker_id = self.worker_id,
                worker_name = self.worker_name,
                "{}", self
            );
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "worker_registered",
            span_name = name,
            worker_id = self.worker_id,
            worker_name = self.worker_name,
        )
    }
}

/// A metrics worker wrote (or deliberately skipped) a metric.
///
/// # Log Level
/// `debug!`
pub struct MetricRecorded<'a> {
    pub worker_name: &'a str,
    pub username: &'a str,
    pub metric: &'a str,
    pub written: bool,
}

impl Display for MetricRecorded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let verb = if self.written { "recorded" } else { "skipped" };
        write!(
            f,
            "Worker '{}' {} metric '{}' for user '{}'",
            self.worker_name, verb, self.metric, self.username
        )
    }
}

impl StructuredLog for MetricRecorded<'_> {
    fn log(&self) {
        tracing::debug!(
            worker_name = self.worker_name,
            username = self.username,
            metric = self.metric,
            written = self.written,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "metric_recorded",
            span_name = name,
            worker_name = self.worker_name,
            username = self.username,
        )
    }
}
