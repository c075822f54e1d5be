// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::Worker;
use std::collections::HashMap;
use std::sync::Arc;

/// A type-safe registry mapping worker IDs to their implementations.
///
/// The `WorkerRegistry` is the fan-out target set for every message. It maps
/// unique worker IDs to implementations wrapped in `Arc<dyn Worker>` so the
/// same instance can be invoked from many consumer loops and dispatch tasks
/// at once.
///
/// The registry is populated before a processor starts. Once started, the
/// processor works from a frozen snapshot, so the set of IDs used for one
/// message's fan-out never changes mid-dispatch.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use metricsworker::config::WorkerRegistry;
/// use metricsworker::backends::metrics::LogWorker;
///
/// let mut registry = WorkerRegistry::new();
/// registry.register("log", Arc::new(LogWorker::new()));
///
/// assert!(registry.contains_key("log"));
/// assert_eq!(registry.ids(), vec!["log".to_string()]);
/// ```
#[derive(Clone, Default)]
pub struct WorkerRegistry(pub HashMap<String, Arc<dyn Worker>>);

impl WorkerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Bind `worker` to `id`, replacing and returning any previous binding
    pub fn register(
        &mut self,
        id: impl Into<String>,
        worker: Arc<dyn Worker>,
    ) -> Option<Arc<dyn Worker>> {
        self.0.insert(id.into(), worker)
    }

    /// Get a worker by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Worker>> {
        self.0.get(id)
    }

    /// Check if a worker exists
    pub fn contains_key(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Owned snapshot of every registered ID, in no particular order
    pub fn ids(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for WorkerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerRegistry")
            .field("worker_count", &self.0.len())
            .field("worker_ids", &self.0.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl From<HashMap<String, Arc<dyn Worker>>> for WorkerRegistry {
    fn from(map: HashMap<String, Arc<dyn Worker>>) -> Self {
        Self(map)
    }
}

impl From<WorkerRegistry> for HashMap<String, Arc<dyn Worker>> {
    fn from(registry: WorkerRegistry) -> Self {
        registry.0
    }
}
