// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors reported by workers for a single task.
//!
//! The dispatch engine never inspects these beyond logging them; a malformed
//! payload is just another failed outcome for the worker that rejected it.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    /// The task body could not be decoded into what the worker expects.
    #[error("malformed payload ({body}): {reason}")]
    MalformedPayload { body: String, reason: String },

    /// The task was decodable but not acceptable to this worker.
    #[error("invalid task: {0}")]
    InvalidTask(String),

    /// The backing store rejected the write.
    #[error("store operation failed: {0}")]
    Store(String),

    /// The worker panicked while executing the task.
    #[error("worker panicked: {0}")]
    Panicked(String),

    /// The worker exceeded the configured per-invocation timeout.
    #[error("worker timed out after {0:?}")]
    TimedOut(Duration),

    /// The dispatcher was asked to run a worker that is not registered.
    #[error("no worker registered under id '{0}'")]
    NotRegistered(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
