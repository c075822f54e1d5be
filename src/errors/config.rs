// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Errors that can occur while validating a runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The processor was configured to run zero consumer loops
    ZeroConcurrency,
    /// Two workers share the same identifier
    DuplicateWorkerId {
        /// The duplicate worker ID
        worker_id: String,
    },
    /// A worker references an implementation that does not exist
    UnknownWorkerKind {
        /// The worker that has the unknown kind
        worker_id: String,
        /// The kind that couldn't be resolved
        kind: String,
    },
    /// A file-backed adapter was configured without a path
    MissingAdapterPath,
    /// No workers are configured, so every message would be dropped
    NoWorkers,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroConcurrency => {
                write!(f, "Processor concurrency must be at least 1")
            }
            ValidationError::DuplicateWorkerId { worker_id } => {
                write!(f, "Duplicate worker ID: '{}'", worker_id)
            }
            ValidationError::UnknownWorkerKind { worker_id, kind } => {
                write!(
                    f,
                    "Worker '{}' uses unknown implementation '{}'",
                    worker_id, kind
                )
            }
            ValidationError::MissingAdapterPath => {
                write!(f, "The 'lines' adapter requires a 'path' (use \"-\" for stdin)")
            }
            ValidationError::NoWorkers => {
                write!(f, "At least one worker must be configured")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{0}")]
    Invalid(String),
}
