// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! Every check runs and every failure is collected, so a broken config file is
//! reported in one pass:
//!
//! 1. **Concurrency**: at least one consumer loop
//! 2. **Adapter**: file-backed adapters need a path
//! 3. **Workers**: at least one worker, unique IDs, known implementations

use std::collections::HashSet;

use crate::backends::metrics::WorkerFactory;
use crate::config::{AdapterConfig, Config};
use crate::errors::ValidationError;
use crate::observability::messages::{validation::ConfigValidationFailed, StructuredLog};

/// Validate a loaded configuration
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.processor.concurrency == 0 {
        errors.push(ValidationError::ZeroConcurrency);
    }

    if let AdapterConfig::Lines { path: None } = &config.adapter {
        errors.push(ValidationError::MissingAdapterPath);
    }

    if config.workers.is_empty() {
        errors.push(ValidationError::NoWorkers);
    }

    let mut seen = HashSet::new();
    for worker in &config.workers {
        if !seen.insert(worker.id.as_str()) {
            errors.push(ValidationError::DuplicateWorkerId {
                worker_id: worker.id.clone(),
            });
        }
        if !WorkerFactory::is_implementation_available(&worker.kind) {
            errors.push(ValidationError::UnknownWorkerKind {
                worker_id: worker.id.clone(),
                kind: worker.kind.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        ConfigValidationFailed { errors: &errors }.log();
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProcessorSettings, WorkerConfig};

    fn worker(id: &str, kind: &str) -> WorkerConfig {
        WorkerConfig {
            id: id.to_string(),
            kind: kind.to_string(),
        }
    }

    fn config(concurrency: usize, adapter: AdapterConfig, workers: Vec<WorkerConfig>) -> Config {
        Config {
            processor: ProcessorSettings {
                concurrency,
                ..ProcessorSettings::default()
            },
            adapter,
            workers,
        }
    }

    fn lines(path: &str) -> AdapterConfig {
        AdapterConfig::Lines {
            path: Some(path.to_string()),
        }
    }

    #[test]
    fn test_valid_config() {
        let cfg = config(
            2,
            lines("metrics.jsonl"),
            vec![
                worker("distinctName", "distinct_name"),
                worker("hourlyLog", "hourly_log"),
                worker("accountName", "account_name"),
            ],
        );
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_validation_table_driven() {
        struct TestCase {
            name: &'static str,
            config: Config,
            expected: Vec<ValidationError>,
        }

        let test_cases = vec![
            TestCase {
                name: "zero concurrency",
                config: config(0, lines("-"), vec![worker("log", "log")]),
                expected: vec![ValidationError::ZeroConcurrency],
            },
            TestCase {
                name: "lines adapter without path",
                config: config(1, AdapterConfig::Lines { path: None }, vec![worker("log", "log")]),
                expected: vec![ValidationError::MissingAdapterPath],
            },
            TestCase {
                name: "no workers",
                config: config(1, AdapterConfig::Memory { payloads: vec![] }, vec![]),
                expected: vec![ValidationError::NoWorkers],
            },
            TestCase {
                name: "duplicate worker ids",
                config: config(1, lines("-"), vec![worker("w", "log"), worker("w", "log")]),
                expected: vec![ValidationError::DuplicateWorkerId {
                    worker_id: "w".to_string(),
                }],
            },
            TestCase {
                name: "unknown worker kind",
                config: config(1, lines("-"), vec![worker("w", "carrier_pigeon")]),
                expected: vec![ValidationError::UnknownWorkerKind {
                    worker_id: "w".to_string(),
                    kind: "carrier_pigeon".to_string(),
                }],
            },
        ];

        for tc in test_cases {
            let errors = validate_config(&tc.config).expect_err(tc.name);
            assert_eq!(errors, tc.expected, "case: {}", tc.name);
        }
    }
}
