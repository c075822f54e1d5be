// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::{AccountNameWorker, DistinctNameWorker, HourlyLogWorker, LogWorker, MetricStores};
use crate::config::WorkerConfig;
use crate::traits::Worker;

/// Factory for the built-in metrics workers
pub struct WorkerFactory;

impl WorkerFactory {
    /// Create a worker instance from configuration
    ///
    /// The `type` field in the config selects the worker:
    /// - "distinct_name" -> DistinctNameWorker (event index)
    /// - "hourly_log" -> HourlyLogWorker (document collection)
    /// - "account_name" -> AccountNameWorker (account table)
    /// - "log" -> LogWorker
    pub fn create_worker(
        config: &WorkerConfig,
        stores: &MetricStores,
    ) -> Result<Arc<dyn Worker>, String> {
        match config.kind.as_str() {
            "distinct_name" => Ok(Arc::new(DistinctNameWorker::new(stores.events.clone()))),
            "hourly_log" => Ok(Arc::new(HourlyLogWorker::new(stores.documents.clone()))),
            "account_name" => Ok(Arc::new(AccountNameWorker::new(stores.accounts.clone()))),
            "log" => Ok(Arc::new(LogWorker::new())),
            other => Err(format!(
                "Unknown worker type '{}' for worker '{}'",
                other, config.id
            )),
        }
    }

    /// List all available worker types
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec!["distinct_name", "hourly_log", "account_name", "log"]
    }

    /// Check if a worker type is available
    pub fn is_implementation_available(kind: &str) -> bool {
        Self::list_available_implementations().contains(&kind)
    }
}
