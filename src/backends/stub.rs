// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::WorkerError;
use crate::message::Delivery;
use crate::traits::Worker;

/// A worker that succeeds, optionally after a delay, and remembers what it saw
#[derive(Default)]
pub struct StubWorker {
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<Delivery>>,
}

impl StubWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<Delivery> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Worker for StubWorker {
    async fn execute(&self, task: &Delivery) -> Result<(), WorkerError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.seen.lock().unwrap().push(task.clone());
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// A worker that always fails for testing failure scenarios
pub struct FailingWorker {
    reason: String,
    calls: AtomicUsize,
}

impl FailingWorker {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Worker for FailingWorker {
    async fn execute(&self, _task: &Delivery) -> Result<(), WorkerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(WorkerError::InvalidTask(self.reason.clone()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// A worker that panics mid-task
pub struct PanickingWorker {
    message: &'static str,
}

impl PanickingWorker {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[async_trait::async_trait]
impl Worker for PanickingWorker {
    async fn execute(&self, _task: &Delivery) -> Result<(), WorkerError> {
        panic!("{}", self.message);
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

/// In-memory log sink for asserting on what reached an injected logger
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// A debug-level fmt subscriber writing into this sink.
    pub fn dispatch(&self) -> tracing::Dispatch {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        tracing::Dispatch::new(subscriber)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
