// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processor construction options.
//!
//! Options are supplied once, when the processor is built, and are read-only
//! afterwards. Every setter consumes and returns the options so they chain:
//!
//! ```
//! use metricsworker::config::ProcessorOptions;
//! use std::time::Duration;
//!
//! let options = ProcessorOptions::default()
//!     .with_concurrency(4)
//!     .with_wait_timeout(Duration::from_millis(200));
//!
//! assert_eq!(options.concurrency(), 4);
//! assert_eq!(options.wait_timeout(), Duration::from_millis(200));
//! assert!(options.worker_timeout().is_none());
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Dispatch;

use crate::config::consts::{DEFAULT_CONCURRENCY, DEFAULT_WAIT_TIMEOUT};
use crate::observability::messages::validation::ConcurrencyClamped;
use crate::traits::{FailureHandler, LogOnlyFailureHandler};

#[derive(Clone)]
pub struct ProcessorOptions {
    concurrency: usize,
    requested_concurrency: usize,
    wait_timeout: Duration,
    worker_timeout: Option<Duration>,
    logger: Option<Dispatch>,
    failure_handler: Arc<dyn FailureHandler>,
    shutdown: Option<CancellationToken>,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            requested_concurrency: DEFAULT_CONCURRENCY,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            worker_timeout: None,
            logger: None,
            failure_handler: Arc::new(LogOnlyFailureHandler),
            shutdown: None,
        }
    }
}

impl ProcessorOptions {
    /// Number of consumer loops run in parallel. Zero is raised to one; the
    /// processor reports the clamp through its logger when it is built.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.requested_concurrency = concurrency;
        self.concurrency = concurrency.max(1);
        self
    }

    /// How long a consumer loop waits for the next message before terminating.
    pub fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// Upper bound on a single worker invocation. Unbounded when unset.
    pub fn with_worker_timeout(mut self, worker_timeout: Duration) -> Self {
        self.worker_timeout = Some(worker_timeout);
        self
    }

    /// Route every diagnostic the processor emits to `dispatch` instead of the
    /// process-wide subscriber.
    pub fn with_logger(mut self, dispatch: Dispatch) -> Self {
        self.logger = Some(dispatch);
        self
    }

    pub fn with_failure_handler(mut self, handler: Arc<dyn FailureHandler>) -> Self {
        self.failure_handler = handler;
        self
    }

    /// Parent token for process-wide shutdown. Cancelling it abandons message
    /// retrieval; in-flight worker invocations still run to completion.
    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// The clamp applied to the requested concurrency, if any.
    pub(crate) fn concurrency_clamp(&self) -> Option<ConcurrencyClamped> {
        (self.requested_concurrency != self.concurrency).then(|| ConcurrencyClamped {
            requested: self.requested_concurrency,
            applied: self.concurrency,
        })
    }

    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    pub fn worker_timeout(&self) -> Option<Duration> {
        self.worker_timeout
    }

    pub fn logger(&self) -> Option<&Dispatch> {
        self.logger.as_ref()
    }

    pub fn failure_handler(&self) -> &Arc<dyn FailureHandler> {
        &self.failure_handler
    }

    pub fn shutdown_token(&self) -> Option<&CancellationToken> {
        self.shutdown.as_ref()
    }
}

impl std::fmt::Debug for ProcessorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorOptions")
            .field("concurrency", &self.concurrency)
            .field("wait_timeout", &self.wait_timeout)
            .field("worker_timeout", &self.worker_timeout)
            .field("custom_logger", &self.logger.is_some())
            .field("shutdown_token", &self.shutdown.is_some())
            .finish()
    }
}
