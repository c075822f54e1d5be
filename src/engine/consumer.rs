// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Consumer loop: one of the processor's long-lived listening tasks.
//!
//! A loop is either listening or terminated. While listening it races the
//! shared message sequence against its idle timer and a shutdown token; the
//! timer restarts every time the loop comes back to wait after a message.

use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::WorkerRegistry;
use crate::engine::dispatcher::dispatch;
use crate::message::Message;
use crate::observability::messages::engine::{
    ConsumerLoopExited, ConsumerLoopStarted, MessageDispatched,
};
use crate::observability::messages::worker::TaskFailed;
use crate::observability::messages::StructuredLog;
use crate::traits::{FailureHandler, MessageReceiver};

/// Why a consumer loop reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The adapter's message sequence ended.
    Closed,
    /// No message arrived within the idle-wait timeout.
    IdleTimeout,
    /// The shutdown token was cancelled.
    Cancelled,
}

impl Display for LoopExit {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let reason = match self {
            LoopExit::Closed => "message sequence closed",
            LoopExit::IdleTimeout => "idle timeout",
            LoopExit::Cancelled => "shutdown requested",
        };
        f.write_str(reason)
    }
}

/// Snapshot of what a processor's consumer loops have done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorStats {
    pub messages_processed: u64,
    pub worker_failures: u64,
    pub loops_closed: u64,
    pub loops_idle_timeout: u64,
    pub loops_cancelled: u64,
    /// Highest number of consumer loops listening at the same time.
    pub peak_active_loops: usize,
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    messages_processed: AtomicU64,
    worker_failures: AtomicU64,
    loops_closed: AtomicU64,
    loops_idle_timeout: AtomicU64,
    loops_cancelled: AtomicU64,
    active_loops: AtomicUsize,
    peak_active_loops: AtomicUsize,
}

impl StatsCounters {
    pub(crate) fn snapshot(&self) -> ProcessorStats {
        ProcessorStats {
            messages_processed: self.messages_processed.load(Ordering::Relaxed),
            worker_failures: self.worker_failures.load(Ordering::Relaxed),
            loops_closed: self.loops_closed.load(Ordering::Relaxed),
            loops_idle_timeout: self.loops_idle_timeout.load(Ordering::Relaxed),
            loops_cancelled: self.loops_cancelled.load(Ordering::Relaxed),
            peak_active_loops: self.peak_active_loops.load(Ordering::Relaxed),
        }
    }

    fn loop_entered(&self) {
        let active = self.active_loops.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_active_loops.fetch_max(active, Ordering::SeqCst);
    }

    fn loop_exited(&self, exit: LoopExit) {
        self.active_loops.fetch_sub(1, Ordering::SeqCst);
        let counter = match exit {
            LoopExit::Closed => &self.loops_closed,
            LoopExit::IdleTimeout => &self.loops_idle_timeout,
            LoopExit::Cancelled => &self.loops_cancelled,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Message sequence shared by every loop of one processor run.
///
/// Loops compete for the lock; whoever holds it receives the next message,
/// so no message is observed twice.
pub(crate) type SharedMessages = Arc<Mutex<MessageReceiver>>;

pub(crate) struct ConsumerLoop {
    pub loop_id: usize,
    pub messages: SharedMessages,
    pub registry: Arc<WorkerRegistry>,
    pub wait_timeout: Duration,
    pub worker_timeout: Option<Duration>,
    pub failure_handler: Arc<dyn FailureHandler>,
    pub shutdown: CancellationToken,
    pub stats: Arc<StatsCounters>,
}

impl ConsumerLoop {
    /// Listen until the sequence closes, the idle timer fires or shutdown is requested.
    pub async fn run(self) -> LoopExit {
        let started = ConsumerLoopStarted {
            loop_id: self.loop_id,
        };
        let span = started.span("consumer_loop");
        self.listen(started).instrument(span).await
    }

    async fn listen(self, started: ConsumerLoopStarted) -> LoopExit {
        started.log();
        self.stats.loop_entered();

        let mut processed = 0u64;
        let exit = loop {
            let received = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break LoopExit::Cancelled,
                received = tokio::time::timeout(self.wait_timeout, self.next_message()) => received,
            };

            match received {
                Err(_elapsed) => break LoopExit::IdleTimeout,
                Ok(None) => break LoopExit::Closed,
                Ok(Some(message)) => {
                    self.handle(message).await;
                    processed += 1;
                }
            }
        };

        self.stats.loop_exited(exit);
        ConsumerLoopExited {
            loop_id: self.loop_id,
            reason: exit,
            messages_processed: processed,
        }
        .log();
        exit
    }

    async fn next_message(&self) -> Option<Message> {
        self.messages.lock().await.recv().await
    }

    /// Fan the message out to every registered worker and drain all outcomes.
    async fn handle(&self, message: Message) {
        let worker_ids = self.registry.ids();
        MessageDispatched {
            loop_id: self.loop_id,
            worker_count: worker_ids.len(),
            payload_size: message.payload.len(),
        }
        .log();

        let mut outcomes = dispatch(
            &self.registry,
            Arc::new(message.original),
            &worker_ids,
            self.worker_timeout,
        );

        while let Some(outcome) = outcomes.next().await {
            if let Some(error) = &outcome.error {
                self.stats.worker_failures.fetch_add(1, Ordering::Relaxed);
                TaskFailed {
                    worker_id: &outcome.worker_id,
                    error,
                }
                .log();
                self.failure_handler.handle_failed_task(&outcome);
            }
        }

        self.stats.messages_processed.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{FailingWorker, StubWorker};
    use crate::engine::TaskOutcome;
    use crate::traits::LogOnlyFailureHandler;
    use std::time::Instant;
    use tokio::sync::mpsc;

    fn consumer(
        messages: SharedMessages,
        registry: WorkerRegistry,
        wait_timeout: Duration,
        failure_handler: Arc<dyn FailureHandler>,
    ) -> (ConsumerLoop, Arc<StatsCounters>, CancellationToken) {
        let stats = Arc::new(StatsCounters::default());
        let shutdown = CancellationToken::new();
        let consumer = ConsumerLoop {
            loop_id: 0,
            messages,
            registry: Arc::new(registry),
            wait_timeout,
            worker_timeout: None,
            failure_handler,
            shutdown: shutdown.clone(),
            stats: stats.clone(),
        };
        (consumer, stats, shutdown)
    }

    #[tokio::test]
    async fn test_closed_sequence_terminates_without_waiting() {
        let (tx, rx) = mpsc::channel(8);
        for i in 0..6 {
            tx.send(Message::new(format!("message {}", i + 1))).await.unwrap();
        }
        drop(tx);

        let stub = Arc::new(StubWorker::new());
        let mut registry = WorkerRegistry::new();
        registry.register("w1", stub.clone());

        let (consumer, stats, _) = consumer(
            Arc::new(Mutex::new(rx)),
            registry,
            Duration::from_secs(10),
            Arc::new(LogOnlyFailureHandler),
        );

        let started = Instant::now();
        let exit = consumer.run().await;

        assert_eq!(exit, LoopExit::Closed);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(stub.calls(), 6);
        assert_eq!(stats.snapshot().messages_processed, 6);
        assert_eq!(stats.snapshot().loops_closed, 1);
        assert_eq!(stats.snapshot().loops_idle_timeout, 0);
    }

    #[tokio::test]
    async fn test_idle_timeout_when_nothing_arrives() {
        let (tx, rx) = mpsc::channel::<Message>(1);
        let (consumer, stats, _) = consumer(
            Arc::new(Mutex::new(rx)),
            WorkerRegistry::new(),
            Duration::from_millis(200),
            Arc::new(LogOnlyFailureHandler),
        );

        let started = Instant::now();
        let exit = consumer.run().await;
        let elapsed = started.elapsed();

        assert_eq!(exit, LoopExit::IdleTimeout);
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(1_500));
        assert_eq!(stats.snapshot().loops_idle_timeout, 1);
        drop(tx);
    }

    #[tokio::test]
    async fn test_idle_timer_resets_per_wait_cycle() {
        let (tx, rx) = mpsc::channel(1);
        let stub = Arc::new(StubWorker::new());
        let mut registry = WorkerRegistry::new();
        registry.register("w1", stub.clone());

        // The whole run outlasts one 300ms wait; each gap does not.
        tokio::spawn(async move {
            for i in 0..3 {
                tokio::time::sleep(Duration::from_millis(120)).await;
                if tx.send(Message::new(format!("m{}", i))).await.is_err() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let (consumer, _, _) = consumer(
            Arc::new(Mutex::new(rx)),
            registry,
            Duration::from_millis(300),
            Arc::new(LogOnlyFailureHandler),
        );

        assert_eq!(consumer.run().await, LoopExit::IdleTimeout);
        assert_eq!(stub.calls(), 3);
    }

    #[tokio::test]
    async fn test_cancellation_abandons_wait() {
        let (_tx, rx) = mpsc::channel::<Message>(1);
        let (consumer, stats, shutdown) = consumer(
            Arc::new(Mutex::new(rx)),
            WorkerRegistry::new(),
            Duration::from_secs(30),
            Arc::new(LogOnlyFailureHandler),
        );

        let handle = tokio::spawn(consumer.run());
        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown.cancel();

        let exit = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("loop should stop promptly")
            .expect("loop task should not panic");
        assert_eq!(exit, LoopExit::Cancelled);
        assert_eq!(stats.snapshot().loops_cancelled, 1);
    }

    #[tokio::test]
    async fn test_failures_reach_failure_handler() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(Message::new("m1")).await.unwrap();
        tx.send(Message::new("m2")).await.unwrap();
        drop(tx);

        let mut registry = WorkerRegistry::new();
        registry.register("distinctName", Arc::new(StubWorker::new()));
        registry.register("hourlyLog", Arc::new(FailingWorker::new("Failed task")));

        let failed = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = failed.clone();
        let handler: Arc<dyn FailureHandler> = Arc::new(move |outcome: &TaskOutcome| {
            sink.lock().unwrap().push(outcome.worker_id.clone());
        });

        let (consumer, stats, _) = consumer(
            Arc::new(Mutex::new(rx)),
            registry,
            Duration::from_secs(1),
            handler,
        );

        assert_eq!(consumer.run().await, LoopExit::Closed);
        assert_eq!(
            *failed.lock().unwrap(),
            vec!["hourlyLog".to_string(), "hourlyLog".to_string()]
        );
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.messages_processed, 2);
        assert_eq!(snapshot.worker_failures, 2);
    }

    #[test]
    fn test_loop_exit_display() {
        assert_eq!(LoopExit::Closed.to_string(), "message sequence closed");
        assert_eq!(LoopExit::IdleTimeout.to_string(), "idle timeout");
        assert_eq!(LoopExit::Cancelled.to_string(), "shutdown requested");
    }
}
