// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::consts::MESSAGE_CHANNEL_CAPACITY;
use crate::errors::AdapterError;
use crate::message::Message;
use crate::traits::{Adapter, MessageReceiver};

/// Adapter that replays a fixed list of messages.
///
/// By default the sequence closes after the last message. `hold_open` keeps
/// it open until the processor's shutdown token is cancelled, which models a
/// live queue that has gone quiet.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    messages: Vec<Message>,
    initial_delay: Option<Duration>,
    hold_open: bool,
    open_error: Option<String>,
    messages_error: Option<String>,
    close_error: Option<String>,
    open_calls: AtomicUsize,
    close_calls: AtomicUsize,
}

impl MemoryAdapter {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// An adapter whose sequence closes without producing anything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wait before emitting the first message.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Keep the sequence open after the last message until shutdown.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    pub fn fail_open(mut self, reason: impl Into<String>) -> Self {
        self.open_error = Some(reason.into());
        self
    }

    pub fn fail_messages(mut self, reason: impl Into<String>) -> Self {
        self.messages_error = Some(reason.into());
        self
    }

    pub fn fail_close(mut self, reason: impl Into<String>) -> Self {
        self.close_error = Some(reason.into());
        self
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Adapter for MemoryAdapter {
    async fn open(&self) -> Result<(), AdapterError> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        match &self.open_error {
            Some(reason) => Err(AdapterError::Open(reason.clone())),
            None => Ok(()),
        }
    }

    async fn close(&self) -> Result<(), AdapterError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        match &self.close_error {
            Some(reason) => Err(AdapterError::Close(reason.clone())),
            None => Ok(()),
        }
    }

    async fn messages(&self, token: CancellationToken) -> Result<MessageReceiver, AdapterError> {
        if let Some(reason) = &self.messages_error {
            return Err(AdapterError::Messages(reason.clone()));
        }

        let (sender, receiver) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);
        let messages = self.messages.clone();
        let initial_delay = self.initial_delay;
        let hold_open = self.hold_open;

        tokio::spawn(async move {
            if let Some(delay) = initial_delay {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            for message in messages {
                tokio::select! {
                    _ = token.cancelled() => return,
                    sent = sender.send(message) => {
                        if sent.is_err() {
                            return;
                        }
                    }
                }
            }

            if hold_open {
                token.cancelled().await;
            }
        });

        Ok(receiver)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_then_closes() {
        let adapter = MemoryAdapter::new(vec![Message::new("a"), Message::new("b")]);
        let mut receiver = adapter.messages(CancellationToken::new()).await.unwrap();

        assert_eq!(receiver.recv().await.map(|m| m.payload), Some(b"a".to_vec()));
        assert_eq!(receiver.recv().await.map(|m| m.payload), Some(b"b".to_vec()));
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_hold_open_closes_on_cancel() {
        let adapter = MemoryAdapter::empty().hold_open();
        let token = CancellationToken::new();
        let mut receiver = adapter.messages(token.clone()).await.unwrap();

        let pending = tokio::time::timeout(Duration::from_millis(50), receiver.recv()).await;
        assert!(pending.is_err(), "sequence should still be open");

        token.cancel();
        let closed = tokio::time::timeout(Duration::from_secs(1), receiver.recv())
            .await
            .expect("sequence should close after cancel");
        assert!(closed.is_none());
    }

    #[tokio::test]
    async fn test_injected_failures_and_counters() {
        let adapter = MemoryAdapter::empty()
            .fail_open("open refused")
            .fail_messages("no queue")
            .fail_close("close refused");

        assert!(matches!(adapter.open().await, Err(AdapterError::Open(r)) if r == "open refused"));
        assert!(matches!(
            adapter.messages(CancellationToken::new()).await,
            Err(AdapterError::Messages(_))
        ));
        assert!(matches!(adapter.close().await, Err(AdapterError::Close(_))));
        assert_eq!(adapter.open_calls(), 1);
        assert_eq!(adapter.close_calls(), 1);
    }
}
