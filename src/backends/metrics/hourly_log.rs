// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::backends::metrics::{CountMetric, DocumentCollection};
use crate::config::consts::HOURLY_LOG_WINDOW_MINUTES;
use crate::errors::WorkerError;
use crate::message::Delivery;
use crate::observability::messages::{worker::MetricRecorded, StructuredLog};
use crate::traits::Worker;

/// Hourly Log worker - keeps metrics whose delivery is at most an hour old.
///
/// The delivery timestamp stands in for the time the event happened. Older
/// deliveries succeed without a write.
pub struct HourlyLogWorker {
    documents: Arc<dyn DocumentCollection>,
}

impl HourlyLogWorker {
    pub fn new(documents: Arc<dyn DocumentCollection>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl Worker for HourlyLogWorker {
    async fn execute(&self, task: &Delivery) -> Result<(), WorkerError> {
        let metric = CountMetric::from_slice(&task.body)?;
        let age = Utc::now() - task.timestamp;
        let in_window = age <= chrono::Duration::minutes(HOURLY_LOG_WINDOW_MINUTES);

        if in_window {
            self.documents.insert(metric.clone()).await?;
        }

        MetricRecorded {
            worker_name: self.name(),
            username: &metric.username,
            metric: &metric.metric,
            written: in_window,
        }
        .log();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "hourly_log"
    }
}
