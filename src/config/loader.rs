// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_CONCURRENCY, DEFAULT_WAIT_TIMEOUT};
use crate::config::ProcessorOptions;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for the metrics worker binary.
///
/// Describes the processor's tuning, which adapter feeds it and which
/// workers every message fans out to. It is typically loaded from a YAML
/// or TOML file.
///
/// # Fields
/// * `processor` - Consumer loop tuning (optional, defaults apply)
/// * `adapter` - The message source
/// * `workers` - Worker definitions, one per registry entry
///
/// # Example
/// ```yaml
/// processor:
///   concurrency: 2
///   wait_timeout_ms: 500
/// adapter:
///   type: lines
///   path: metrics.jsonl
/// workers:
///   - id: distinctName
///     type: distinct_name
///   - id: hourlyLog
///     type: hourly_log
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub processor: ProcessorSettings,
    pub adapter: AdapterConfig,
    #[serde(default)]
    pub workers: Vec<WorkerConfig>,
}

/// Processor tuning as it appears in a config file.
///
/// # Fields
/// * `concurrency` - Number of consumer loops (defaults to 1)
/// * `wait_timeout_ms` - Idle wait per loop in milliseconds (defaults to 500)
/// * `worker_timeout_ms` - Upper bound per worker invocation (optional, unbounded)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProcessorSettings {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
    #[serde(default)]
    pub worker_timeout_ms: Option<u64>,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_wait_timeout_ms() -> u64 {
    DEFAULT_WAIT_TIMEOUT.as_millis() as u64
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            wait_timeout_ms: default_wait_timeout_ms(),
            worker_timeout_ms: None,
        }
    }
}

impl ProcessorSettings {
    /// Convert file settings into processor options.
    pub fn to_options(&self) -> ProcessorOptions {
        let options = ProcessorOptions::default()
            .with_concurrency(self.concurrency)
            .with_wait_timeout(Duration::from_millis(self.wait_timeout_ms));

        match self.worker_timeout_ms {
            Some(ms) => options.with_worker_timeout(Duration::from_millis(ms)),
            None => options,
        }
    }
}

/// Message source configuration.
///
/// # Variants
/// * `Lines` - Newline-delimited payloads from a file, or stdin when `path` is `-`
/// * `Memory` - A fixed list of payloads, mostly useful for demos
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdapterConfig {
    Lines {
        #[serde(default)]
        path: Option<String>,
    },
    Memory {
        #[serde(default)]
        payloads: Vec<String>,
    },
}

/// Configuration for a single worker.
///
/// # Fields
/// * `id` - Unique identifier the worker is registered under
/// * `kind` - Implementation name (`distinct_name`, `hourly_log`, `account_name`, `log`)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WorkerConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Load a config from a YAML or TOML file, chosen by extension
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        "toml" => Ok(toml::from_str(&content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// Load and validate a config file
///
/// All validation errors are reported together in a single
/// [`ConfigError::Invalid`].
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;

    if let Err(validation_errors) = crate::config::validate_config(&cfg) {
        let error_messages: Vec<String> = validation_errors.iter().map(|e| e.to_string()).collect();
        return Err(ConfigError::Invalid(error_messages.join("\n")));
    }

    Ok(cfg)
}
