// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Hook invoked for every failed task outcome.
//!
//! The engine performs no recovery itself. A handler receives each failed
//! outcome after it has been logged; the default only records that it was
//! called. Retry policies plug in here without touching the dispatch core.

use crate::engine::TaskOutcome;
use crate::observability::messages::{worker::FailedTaskHandled, StructuredLog};

pub trait FailureHandler: Send + Sync {
    fn handle_failed_task(&self, outcome: &TaskOutcome);
}

impl<F> FailureHandler for F
where
    F: Fn(&TaskOutcome) + Send + Sync,
{
    fn handle_failed_task(&self, outcome: &TaskOutcome) {
        self(outcome)
    }
}

/// Default handler: log and move on.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyFailureHandler;

impl FailureHandler for LogOnlyFailureHandler {
    fn handle_failed_task(&self, outcome: &TaskOutcome) {
        FailedTaskHandled {
            worker_id: &outcome.worker_id,
        }
        .log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WorkerError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_closure_is_a_failure_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handler: Arc<dyn FailureHandler> = Arc::new(move |outcome: &TaskOutcome| {
            assert_eq!(outcome.worker_id, "hourlyLog");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let outcome = TaskOutcome::failed("hourlyLog", WorkerError::InvalidTask("nope".into()));
        handler.handle_failed_task(&outcome);
        handler.handle_failed_task(&outcome);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_log_only_handler_does_not_panic() {
        let outcome = TaskOutcome::failed("distinctName", WorkerError::Store("down".into()));
        LogOnlyFailureHandler.handle_failed_task(&outcome);
    }
}
