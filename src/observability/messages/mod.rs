// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit the same data as structured `tracing` fields at the
//! level the message belongs to.
//!
//! # Usage Pattern
//!
//! ```rust
//! use metricsworker::observability::messages::{engine::ConsumerLoopStarted, StructuredLog};
//!
//! let msg = ConsumerLoopStarted { loop_id: 0 };
//! let span = msg.span("consumer_loop");
//! let _guard = span.enter();
//! msg.log();
//! ```

use tracing::Span;

pub mod engine;
pub mod validation;
pub mod worker;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
