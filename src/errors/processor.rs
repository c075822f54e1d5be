// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::AdapterError;
use thiserror::Error;

/// Fatal errors returned from [`Processor::start`](crate::engine::Processor::start).
///
/// Per-task worker failures never show up here; they are logged and handed to
/// the configured failure handler instead.
#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Failed to open the processor adapter connection: {0}")]
    Open(#[source] AdapterError),

    #[error("Failed to get messages from adapter: {0}")]
    Messages(#[source] AdapterError),

    #[error("Processor has already been started; restart is not supported")]
    AlreadyStarted,
}
