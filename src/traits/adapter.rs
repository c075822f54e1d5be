// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::errors::AdapterError;
use crate::message::Message;

/// Receiving half of an adapter's message sequence.
///
/// The sequence is closed once every sender held by the adapter is dropped.
pub type MessageReceiver = mpsc::Receiver<Message>;

/// Connection lifecycle plus inbound message source for a queue-like backend.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Establish the underlying connection.
    async fn open(&self) -> Result<(), AdapterError>;

    /// Release the connection. Called exactly once per processor run.
    async fn close(&self) -> Result<(), AdapterError>;

    /// Start producing messages.
    ///
    /// Implementations must stop producing and drop their sender when
    /// `token` is cancelled or the upstream source is exhausted.
    async fn messages(&self, token: CancellationToken) -> Result<MessageReceiver, AdapterError>;

    fn name(&self) -> &'static str;
}
