// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::backends::metrics::{CountMetric, EventIndex, StoredEvent};
use crate::errors::WorkerError;
use crate::message::Delivery;
use crate::observability::messages::{worker::MetricRecorded, StructuredLog};
use crate::traits::Worker;

/// Distinct Name worker - indexes each (username, metric) pair by arrival time
pub struct DistinctNameWorker {
    events: Arc<dyn EventIndex>,
}

impl DistinctNameWorker {
    pub fn new(events: Arc<dyn EventIndex>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl Worker for DistinctNameWorker {
    async fn execute(&self, task: &Delivery) -> Result<(), WorkerError> {
        let metric = CountMetric::from_slice(&task.body)?;
        let score = Utc::now().timestamp();

        self.events
            .record(
                score,
                StoredEvent {
                    username: metric.username.clone(),
                    metric: metric.metric.clone(),
                },
            )
            .await?;

        MetricRecorded {
            worker_name: self.name(),
            username: &metric.username,
            metric: &metric.metric,
            written: true,
        }
        .log();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "distinct_name"
    }
}
