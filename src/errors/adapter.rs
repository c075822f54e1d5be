// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by queue adapters.

use thiserror::Error;

/// Failures surfaced by an [`Adapter`](crate::traits::Adapter) implementation.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The underlying connection could not be established.
    #[error("failed to open adapter connection: {0}")]
    Open(String),

    /// The inbound message sequence could not be obtained.
    #[error("failed to obtain message sequence: {0}")]
    Messages(String),

    /// The connection could not be released cleanly.
    #[error("failed to close adapter connection: {0}")]
    Close(String),

    #[error("adapter I/O error: {0}")]
    Io(#[from] std::io::Error),
}
