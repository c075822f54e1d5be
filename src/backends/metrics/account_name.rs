// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::backends::metrics::{AccountTable, CountMetric};
use crate::errors::WorkerError;
use crate::message::Delivery;
use crate::observability::messages::{worker::MetricRecorded, StructuredLog};
use crate::traits::Worker;

/// Account Name worker - remembers the first time each username was seen
pub struct AccountNameWorker {
    accounts: Arc<dyn AccountTable>,
}

impl AccountNameWorker {
    pub fn new(accounts: Arc<dyn AccountTable>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl Worker for AccountNameWorker {
    async fn execute(&self, task: &Delivery) -> Result<(), WorkerError> {
        let metric = CountMetric::from_slice(&task.body)?;
        let written = self
            .accounts
            .insert_if_absent(&metric.username, Utc::now().timestamp())
            .await?;

        MetricRecorded {
            worker_name: self.name(),
            username: &metric.username,
            metric: &metric.metric,
            written,
        }
        .log();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "account_name"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::metrics::store::{InMemoryAccountTable, UnavailableStore};

    fn task(username: &str) -> Delivery {
        Delivery::new(format!(
            r#"{{"username":"{}","count":1,"kite_call":"login"}}"#,
            username
        ))
    }

    #[tokio::test]
    async fn test_first_sighting_wins() {
        let table = Arc::new(InMemoryAccountTable::default());
        let worker = AccountNameWorker::new(table.clone());

        worker.execute(&task("ana")).await.unwrap();
        let first = table.timestamp_of("ana").await.unwrap();
        assert!(first.is_some());

        worker.execute(&task("ana")).await.unwrap();
        assert_eq!(table.timestamp_of("ana").await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_malformed_body_fails() {
        let table = Arc::new(InMemoryAccountTable::default());
        let worker = AccountNameWorker::new(table.clone());

        let err = worker.execute(&Delivery::new("not json")).await.unwrap_err();
        assert!(matches!(err, WorkerError::MalformedPayload { .. }));
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let worker = AccountNameWorker::new(Arc::new(UnavailableStore));
        let err = worker.execute(&task("bo")).await.unwrap_err();
        assert!(matches!(err, WorkerError::Store(_)));
    }
}
