// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Storage seams for the metrics workers.
//!
//! Each worker writes to one kind of store. The traits keep the workers
//! independent of any particular database client; the in-memory versions
//! back the binary and the tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backends::metrics::CountMetric;
use crate::errors::WorkerError;

/// One event recorded by the distinct name worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvent {
    pub username: String,
    pub metric: String,
}

/// Time-scored event set.
#[async_trait]
pub trait EventIndex: Send + Sync {
    async fn record(&self, score: i64, event: StoredEvent) -> Result<(), WorkerError>;

    /// Events with `min <= score <= max`, lowest score first.
    async fn range(&self, min: i64, max: i64) -> Result<Vec<StoredEvent>, WorkerError>;
}

/// Append-only collection of metric documents.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    async fn insert(&self, document: CountMetric) -> Result<(), WorkerError>;

    async fn find_by_metric(&self, metric: &str) -> Result<Vec<CountMetric>, WorkerError>;
}

/// Accounts keyed by username.
#[async_trait]
pub trait AccountTable: Send + Sync {
    /// Insert unless the username already exists. Returns whether a row was written.
    async fn insert_if_absent(&self, username: &str, timestamp: i64) -> Result<bool, WorkerError>;

    async fn timestamp_of(&self, username: &str) -> Result<Option<i64>, WorkerError>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventIndex {
    events: RwLock<BTreeMap<i64, Vec<StoredEvent>>>,
}

#[async_trait]
impl EventIndex for InMemoryEventIndex {
    async fn record(&self, score: i64, event: StoredEvent) -> Result<(), WorkerError> {
        self.events.write().await.entry(score).or_default().push(event);
        Ok(())
    }

    async fn range(&self, min: i64, max: i64) -> Result<Vec<StoredEvent>, WorkerError> {
        if min > max {
            return Ok(Vec::new());
        }
        let events = self.events.read().await;
        Ok(events
            .range(min..=max)
            .flat_map(|(_, bucket)| bucket.iter().cloned())
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDocumentCollection {
    documents: RwLock<Vec<CountMetric>>,
}

#[async_trait]
impl DocumentCollection for InMemoryDocumentCollection {
    async fn insert(&self, document: CountMetric) -> Result<(), WorkerError> {
        self.documents.write().await.push(document);
        Ok(())
    }

    async fn find_by_metric(&self, metric: &str) -> Result<Vec<CountMetric>, WorkerError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|d| d.metric == metric)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAccountTable {
    accounts: RwLock<HashMap<String, i64>>,
}

#[async_trait]
impl AccountTable for InMemoryAccountTable {
    async fn insert_if_absent(&self, username: &str, timestamp: i64) -> Result<bool, WorkerError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(username) {
            return Ok(false);
        }
        accounts.insert(username.to_string(), timestamp);
        Ok(true)
    }

    async fn timestamp_of(&self, username: &str) -> Result<Option<i64>, WorkerError> {
        Ok(self.accounts.read().await.get(username).copied())
    }
}

/// The stores shared by every worker built from one configuration.
#[derive(Clone)]
pub struct MetricStores {
    pub events: Arc<dyn EventIndex>,
    pub documents: Arc<dyn DocumentCollection>,
    pub accounts: Arc<dyn AccountTable>,
}

impl MetricStores {
    pub fn in_memory() -> Self {
        Self {
            events: Arc::new(InMemoryEventIndex::default()),
            documents: Arc::new(InMemoryDocumentCollection::default()),
            accounts: Arc::new(InMemoryAccountTable::default()),
        }
    }
}

/// A store that rejects every call, for exercising worker error paths.
#[cfg(test)]
pub(crate) struct UnavailableStore;

#[cfg(test)]
#[async_trait]
impl EventIndex for UnavailableStore {
    async fn record(&self, _score: i64, _event: StoredEvent) -> Result<(), WorkerError> {
        Err(WorkerError::Store("event index unavailable".to_string()))
    }

    async fn range(&self, _min: i64, _max: i64) -> Result<Vec<StoredEvent>, WorkerError> {
        Err(WorkerError::Store("event index unavailable".to_string()))
    }
}

#[cfg(test)]
#[async_trait]
impl DocumentCollection for UnavailableStore {
    async fn insert(&self, _document: CountMetric) -> Result<(), WorkerError> {
        Err(WorkerError::Store("document collection unavailable".to_string()))
    }

    async fn find_by_metric(&self, _metric: &str) -> Result<Vec<CountMetric>, WorkerError> {
        Err(WorkerError::Store("document collection unavailable".to_string()))
    }
}

#[cfg(test)]
#[async_trait]
impl AccountTable for UnavailableStore {
    async fn insert_if_absent(&self, _username: &str, _timestamp: i64) -> Result<bool, WorkerError> {
        Err(WorkerError::Store("account table unavailable".to_string()))
    }

    async fn timestamp_of(&self, _username: &str) -> Result<Option<i64>, WorkerError> {
        Err(WorkerError::Store("account table unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(username: &str) -> StoredEvent {
        StoredEvent {
            username: username.to_string(),
            metric: "login".to_string(),
        }
    }

    #[tokio::test]
    async fn test_event_index_range_is_inclusive_and_ordered() {
        let index = InMemoryEventIndex::default();
        index.record(30, event("c")).await.unwrap();
        index.record(10, event("a")).await.unwrap();
        index.record(20, event("b")).await.unwrap();

        let names: Vec<String> = index
            .range(10, 20)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.username)
            .collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
        assert!(index.range(40, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_account_table_insert_if_absent() {
        let table = InMemoryAccountTable::default();
        assert!(table.insert_if_absent("ana", 100).await.unwrap());
        assert!(!table.insert_if_absent("ana", 200).await.unwrap());
        assert_eq!(table.timestamp_of("ana").await.unwrap(), Some(100));
        assert_eq!(table.timestamp_of("bo").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_document_collection_filters_by_metric() {
        let collection = InMemoryDocumentCollection::default();
        for (user, metric) in [("ana", "login"), ("bo", "upload"), ("cy", "login")] {
            collection
                .insert(CountMetric {
                    username: user.to_string(),
                    count: 1,
                    metric: metric.to_string(),
                })
                .await
                .unwrap();
        }
        assert_eq!(collection.find_by_metric("login").await.unwrap().len(), 2);
        assert!(collection.find_by_metric("logout").await.unwrap().is_empty());
    }
}
