// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::WorkerError;
use crate::message::Delivery;
use crate::traits::Worker;

/// Logs each task body and writes nothing.
#[derive(Debug, Default)]
pub struct LogWorker;

impl LogWorker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Worker for LogWorker {
    async fn execute(&self, task: &Delivery) -> Result<(), WorkerError> {
        tracing::info!(
            worker_name = self.name(),
            routing_key = task.routing_key.as_deref().unwrap_or(""),
            body = %task.body_lossy(),
            "Received task"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_accepts_any_body() {
        let worker = LogWorker::new();
        for body in [&b"message 1"[..], &[0xff, 0xfe][..], &b""[..]] {
            assert!(worker.execute(&Delivery::new(body)).await.is_ok());
        }
    }
}
