// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The task processor: owns the adapter, the worker registry and the options,
//! and drives one run of the consumer loops.
//!
//! # Lifecycle
//!
//! ```text
//! start ─▶ open adapter ─▶ obtain messages ─▶ N consumer loops ─▶ wait for all ─▶ close adapter
//!              │                  │
//!              └─ error: return   └─ error: close, then return
//! ```
//!
//! `start` only fails for the two fatal startup conditions (and for a second
//! call on the same instance). Worker failures are logged per task and handed
//! to the failure handler; they never reach the caller.
//!
//! # Registration
//!
//! `register` needs `&mut self` and `start` freezes a snapshot of the
//! registry, so a worker can never be added while a run is in progress.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::instrument::WithSubscriber;

use crate::config::{ProcessorOptions, WorkerRegistry};
use crate::engine::consumer::{ConsumerLoop, ProcessorStats, StatsCounters};
use crate::errors::ProcessorError;
use crate::observability::messages::engine::{
    AdapterCloseFailed, ConsumerLoopAborted, ProcessorFinished, ProcessorStartFailed,
    ProcessorStarting,
};
use crate::observability::messages::worker::WorkerRegistered;
use crate::observability::messages::StructuredLog;
use crate::traits::{Adapter, Worker};

pub struct Processor {
    adapter: Arc<dyn Adapter>,
    registry: WorkerRegistry,
    options: ProcessorOptions,
    started: AtomicBool,
    stats: Arc<StatsCounters>,
}

impl Processor {
    pub fn new(adapter: Arc<dyn Adapter>, options: ProcessorOptions) -> Self {
        let processor = Self {
            adapter,
            registry: WorkerRegistry::new(),
            options,
            started: AtomicBool::new(false),
            stats: Arc::new(StatsCounters::default()),
        };
        if let Some(clamped) = processor.options.concurrency_clamp() {
            processor.with_logger(|| clamped.log());
        }
        processor
    }

    /// Register a worker to execute every task, replacing any worker bound to `id`.
    pub fn register(&mut self, id: impl Into<String>, worker: Arc<dyn Worker>) {
        let id = id.into();
        let worker_name = worker.name();
        let replaced = self.registry.register(id.clone(), worker).is_some();
        self.with_logger(|| {
            WorkerRegistered {
                worker_id: &id,
                worker_name,
                replaced,
            }
            .log()
        });
    }

    pub fn worker_ids(&self) -> Vec<String> {
        self.registry.ids()
    }

    pub fn registry(&self) -> &WorkerRegistry {
        &self.registry
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// Counters accumulated by the consumer loops so far.
    pub fn stats(&self) -> ProcessorStats {
        self.stats.snapshot()
    }

    /// Run the processor until every consumer loop has terminated.
    pub async fn start(&self) -> Result<(), ProcessorError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(ProcessorError::AlreadyStarted);
        }

        match self.options.logger() {
            Some(dispatch) => self.run().with_subscriber(dispatch.clone()).await,
            None => self.run().await,
        }
    }

    async fn run(&self) -> Result<(), ProcessorError> {
        let adapter_name = self.adapter.name();

        if let Err(error) = self.adapter.open().await {
            ProcessorStartFailed {
                adapter: adapter_name,
                stage: "open",
                error: &error,
            }
            .log();
            return Err(ProcessorError::Open(error));
        }

        let result = self.consume().await;

        if let Err(error) = self.adapter.close().await {
            AdapterCloseFailed {
                adapter: adapter_name,
                error: &error,
            }
            .log();
        }

        result
    }

    async fn consume(&self) -> Result<(), ProcessorError> {
        let adapter_name = self.adapter.name();
        let shutdown = match self.options.shutdown_token() {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        // Stops the adapter's producer on every exit path.
        let _stop_producer = shutdown.clone().drop_guard();

        let messages = match self.adapter.messages(shutdown.clone()).await {
            Ok(messages) => Arc::new(Mutex::new(messages)),
            Err(error) => {
                ProcessorStartFailed {
                    adapter: adapter_name,
                    stage: "messages",
                    error: &error,
                }
                .log();
                return Err(ProcessorError::Messages(error));
            }
        };

        let registry = Arc::new(self.registry.clone());
        let concurrency = self.options.concurrency();
        ProcessorStarting {
            adapter: adapter_name,
            concurrency,
            wait_timeout: self.options.wait_timeout(),
            worker_count: registry.len(),
        }
        .log();

        let started_at = Instant::now();
        let mut loops = JoinSet::new();
        for loop_id in 0..concurrency {
            let consumer = ConsumerLoop {
                loop_id,
                messages: Arc::clone(&messages),
                registry: Arc::clone(&registry),
                wait_timeout: self.options.wait_timeout(),
                worker_timeout: self.options.worker_timeout(),
                failure_handler: Arc::clone(self.options.failure_handler()),
                shutdown: shutdown.clone(),
                stats: Arc::clone(&self.stats),
            };
            loops.spawn(consumer.run().with_current_subscriber());
        }

        while let Some(joined) = loops.join_next().await {
            if let Err(error) = joined {
                ConsumerLoopAborted { error: &error }.log();
            }
        }

        let stats = self.stats.snapshot();
        ProcessorFinished {
            adapter: adapter_name,
            messages_processed: stats.messages_processed,
            worker_failures: stats.worker_failures,
            duration: started_at.elapsed(),
        }
        .log();

        Ok(())
    }

    fn with_logger(&self, f: impl FnOnce()) {
        match self.options.logger() {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("adapter", &self.adapter.name())
            .field("registry", &self.registry)
            .field("options", &self.options)
            .field("started", &self.started.load(Ordering::SeqCst))
            .finish()
    }
}
