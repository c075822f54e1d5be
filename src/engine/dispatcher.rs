// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Fan-out/fan-in of one task across a set of workers.
//!
//! Every targeted worker runs in its own tokio task. Each invocation owns a
//! clone of the outcome sender and reports exactly once, so the outcome
//! sequence closes on its own once the last invocation has reported:
//!
//! ```text
//!            ┌─▶ worker A ─┐
//! task ──────┼─▶ worker B ─┼──▶ outcomes (unordered, closes after the slowest)
//!            └─▶ worker C ─┘
//! ```
//!
//! A worker that panics is caught at its task boundary and reported as a
//! [`WorkerError::Panicked`] outcome for that worker alone.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::instrument::WithSubscriber;

use crate::config::WorkerRegistry;
use crate::errors::WorkerError;
use crate::message::Delivery;
use crate::traits::Worker;

/// Result of one worker invocation for one message.
#[derive(Debug)]
pub struct TaskOutcome {
    pub worker_id: String,
    pub error: Option<WorkerError>,
}

impl TaskOutcome {
    pub fn succeeded(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            error: None,
        }
    }

    pub fn failed(worker_id: impl Into<String>, error: WorkerError) -> Self {
        Self {
            worker_id: worker_id.into(),
            error: Some(error),
        }
    }

    fn from_result(worker_id: String, result: Result<(), WorkerError>) -> Self {
        Self {
            worker_id,
            error: result.err(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Unordered sequence of outcomes for one dispatched task.
///
/// Exhausted only after every launched invocation has reported.
#[derive(Debug)]
pub struct TaskOutcomes {
    receiver: mpsc::UnboundedReceiver<TaskOutcome>,
}

impl TaskOutcomes {
    /// Next outcome in completion order, or `None` once all have been seen.
    pub async fn next(&mut self) -> Option<TaskOutcome> {
        self.receiver.recv().await
    }

    /// Drain the sequence to exhaustion.
    pub async fn collect(mut self) -> Vec<TaskOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.next().await {
            outcomes.push(outcome);
        }
        outcomes
    }
}

/// Run `task` through every worker named in `worker_ids` concurrently.
///
/// IDs missing from `registry` produce a [`WorkerError::NotRegistered`]
/// outcome instead of an invocation. When `worker_timeout` is set, an
/// invocation still running after it is dropped and reported as
/// [`WorkerError::TimedOut`].
///
/// Must be called from within a tokio runtime.
pub fn dispatch(
    registry: &WorkerRegistry,
    task: Arc<Delivery>,
    worker_ids: &[String],
    worker_timeout: Option<Duration>,
) -> TaskOutcomes {
    let (sender, receiver) = mpsc::unbounded_channel();

    for worker_id in worker_ids {
        let Some(worker) = registry.get(worker_id) else {
            let _ = sender.send(TaskOutcome::failed(
                worker_id.clone(),
                WorkerError::NotRegistered(worker_id.clone()),
            ));
            continue;
        };

        let worker = Arc::clone(worker);
        let task = Arc::clone(&task);
        let sender = sender.clone();
        let worker_id = worker_id.clone();

        tokio::spawn(
            async move {
                let invocation =
                    tokio::spawn(invoke(worker, task, worker_timeout).with_current_subscriber());
                let result = match invocation.await {
                    Ok(result) => result,
                    Err(join_error) => Err(panic_to_error(join_error)),
                };
                // The receiver may already be gone if the caller stopped draining.
                let _ = sender.send(TaskOutcome::from_result(worker_id, result));
            }
            .with_current_subscriber(),
        );
    }

    TaskOutcomes { receiver }
}

async fn invoke(
    worker: Arc<dyn Worker>,
    task: Arc<Delivery>,
    worker_timeout: Option<Duration>,
) -> Result<(), WorkerError> {
    match worker_timeout {
        Some(limit) => tokio::time::timeout(limit, worker.execute(&task))
            .await
            .unwrap_or(Err(WorkerError::TimedOut(limit))),
        None => worker.execute(&task).await,
    }
}

fn panic_to_error(join_error: JoinError) -> WorkerError {
    if !join_error.is_panic() {
        return WorkerError::Panicked(join_error.to_string());
    }
    let payload = join_error.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    WorkerError::Panicked(message)
}
