// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation.

use crate::errors::ValidationError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Configuration failed validation.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ConfigValidationFailed<'a> {
    pub errors: &'a [ValidationError],
}

impl Display for ConfigValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let joined: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(
            f,
            "Configuration validation failed with {} errors: {}",
            self.errors.len(),
            joined.join("; ")
        )
    }
}

impl StructuredLog for ConfigValidationFailed<'_> {
    fn log(&self) {
        tracing::error!(error_count = self.errors.len(), "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "config_validation_failed",
            span_name = name,
            error_count = self.errors.len(),
        )
    }
}

/// A non-positive concurrency was raised to the minimum.
///
/// # Log Level
/// `warn!`
pub struct ConcurrencyClamped {
    pub requested: usize,
    pub applied: usize,
}

impl Display for ConcurrencyClamped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Requested concurrency {} is not positive, using {}",
            self.requested, self.applied
        )
    }
}

impl StructuredLog for ConcurrencyClamped {
    fn log(&self) {
        tracing::warn!(
            requested = self.requested,
            applied = self.applied,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("concurrency_clamped", span_name = name, requested = self.requested)
    }
}
