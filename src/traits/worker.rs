// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::WorkerError;
use crate::message::Delivery;

/// A handler that performs one side effect per task.
///
/// Workers are shared across consumer loops and invoked concurrently, so any
/// internal state must be synchronized by the implementation.
#[async_trait]
pub trait Worker: Send + Sync {
    async fn execute(&self, task: &Delivery) -> Result<(), WorkerError>;

    fn name(&self) -> &'static str;
}
