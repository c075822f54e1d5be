// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::adapters::{LinesAdapter, MemoryAdapter};
use crate::backends::metrics::{MetricStores, WorkerFactory};
use crate::config::{AdapterConfig, Config, ProcessorOptions};
use crate::engine::Processor;
use crate::message::Message;
use crate::traits::Adapter;

/// Runtime builder - wires the adapter, workers and processor from configuration.
///
/// Every worker built here shares the same [`MetricStores`], so callers that
/// want to inspect what was written after a run pass their own bundle in.
///
/// # Examples
///
/// ```
/// use metricsworker::backends::metrics::MetricStores;
/// use metricsworker::config::{AdapterConfig, Config, ProcessorSettings, RuntimeBuilder, WorkerConfig};
///
/// let config = Config {
///     processor: ProcessorSettings::default(),
///     adapter: AdapterConfig::Memory { payloads: vec![] },
///     workers: vec![WorkerConfig { id: "log".into(), kind: "log".into() }],
/// };
///
/// let processor = RuntimeBuilder::from_config(&config, &MetricStores::in_memory()).unwrap();
/// assert_eq!(processor.worker_ids(), vec!["log".to_string()]);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a ready-to-start processor from configuration.
    ///
    /// Fails with a description when a worker implementation is unknown.
    pub fn from_config(cfg: &Config, stores: &MetricStores) -> Result<Processor, String> {
        Self::from_config_with_options(cfg, stores, cfg.processor.to_options())
    }

    /// Like [`RuntimeBuilder::from_config`], with caller-built options in place
    /// of the file's `processor` section.
    pub fn from_config_with_options(
        cfg: &Config,
        stores: &MetricStores,
        options: ProcessorOptions,
    ) -> Result<Processor, String> {
        let adapter = Self::adapter_from_config(&cfg.adapter);
        let mut processor = Processor::new(adapter, options);

        for worker_config in &cfg.workers {
            let worker = WorkerFactory::create_worker(worker_config, stores)?;
            processor.register(worker_config.id.clone(), worker);
        }

        Ok(processor)
    }

    /// Build the configured adapter.
    pub fn adapter_from_config(cfg: &AdapterConfig) -> Arc<dyn Adapter> {
        match cfg {
            AdapterConfig::Lines { path } => match path.as_deref() {
                None | Some("-") => Arc::new(LinesAdapter::stdin()),
                Some(path) => Arc::new(LinesAdapter::file(path)),
            },
            AdapterConfig::Memory { payloads } => Arc::new(MemoryAdapter::new(
                payloads.iter().map(|p| Message::new(p.as_bytes())).collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProcessorSettings, WorkerConfig};

    #[test]
    fn test_from_config_registers_every_worker() {
        let cfg = Config {
            processor: ProcessorSettings::default(),
            adapter: AdapterConfig::Lines {
                path: Some("metrics.jsonl".to_string()),
            },
            workers: vec![
                WorkerConfig {
                    id: "distinctName".to_string(),
                    kind: "distinct_name".to_string(),
                },
                WorkerConfig {
                    id: "accountName".to_string(),
                    kind: "account_name".to_string(),
                },
            ],
        };

        let processor = RuntimeBuilder::from_config(&cfg, &MetricStores::in_memory())
            .expect("runtime should build");
        let mut ids = processor.worker_ids();
        ids.sort();
        assert_eq!(ids, vec!["accountName".to_string(), "distinctName".to_string()]);
    }

    #[test]
    fn test_from_config_rejects_unknown_worker() {
        let cfg = Config {
            processor: ProcessorSettings::default(),
            adapter: AdapterConfig::Memory { payloads: vec![] },
            workers: vec![WorkerConfig {
                id: "mystery".to_string(),
                kind: "mystery_kind".to_string(),
            }],
        };

        let err = match RuntimeBuilder::from_config(&cfg, &MetricStores::in_memory()) {
            Ok(_) => panic!("unknown worker kind should fail"),
            Err(e) => e,
        };
        assert!(err.contains("mystery_kind"));
    }

    #[test]
    fn test_adapter_from_config_names() {
        let stdin = RuntimeBuilder::adapter_from_config(&AdapterConfig::Lines {
            path: Some("-".to_string()),
        });
        assert_eq!(stdin.name(), "lines");

        let memory = RuntimeBuilder::adapter_from_config(&AdapterConfig::Memory {
            payloads: vec!["x".to_string()],
        });
        assert_eq!(memory.name(), "memory");
    }
}
