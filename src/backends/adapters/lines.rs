// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::instrument::WithSubscriber;

use crate::config::consts::MESSAGE_CHANNEL_CAPACITY;
use crate::errors::AdapterError;
use crate::message::Message;
use crate::traits::{Adapter, MessageReceiver};

#[derive(Debug, Clone, PartialEq)]
enum Source {
    Stdin,
    File(PathBuf),
}

/// Adapter reading one message per non-empty line.
///
/// The sequence ends at end of input or when the shutdown token is cancelled.
#[derive(Debug)]
pub struct LinesAdapter {
    source: Source,
    open: AtomicBool,
}

impl LinesAdapter {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
            open: AtomicBool::new(false),
        }
    }

    pub fn stdin() -> Self {
        Self {
            source: Source::Stdin,
            open: AtomicBool::new(false),
        }
    }
}

async fn forward_lines<R>(
    reader: R,
    sender: mpsc::Sender<Message>,
    token: CancellationToken,
    routing_key: Option<String>,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = tokio::select! {
            _ = token.cancelled() => return,
            line = lines.next_line() => line,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(error = %error, "Stopped reading input lines: {}", error);
                return;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut message = Message::new(trimmed.as_bytes());
        message.original.routing_key = routing_key.clone();

        tokio::select! {
            _ = token.cancelled() => return,
            sent = sender.send(message) => {
                if sent.is_err() {
                    return;
                }
            }
        }
    }
}

#[async_trait]
impl Adapter for LinesAdapter {
    async fn open(&self) -> Result<(), AdapterError> {
        if let Source::File(path) = &self.source {
            let metadata = tokio::fs::metadata(path)
                .await
                .map_err(|e| AdapterError::Open(format!("{}: {}", path.display(), e)))?;
            if !metadata.is_file() {
                return Err(AdapterError::Open(format!(
                    "{} is not a regular file",
                    path.display()
                )));
            }
        }
        self.open.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self) -> Result<(), AdapterError> {
        if !self.open.swap(false, Ordering::SeqCst) {
            return Err(AdapterError::Close("adapter was not open".to_string()));
        }
        Ok(())
    }

    async fn messages(&self, token: CancellationToken) -> Result<MessageReceiver, AdapterError> {
        if !self.open.load(Ordering::SeqCst) {
            return Err(AdapterError::Messages("adapter is not open".to_string()));
        }

        let (sender, receiver) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);
        match &self.source {
            Source::Stdin => {
                let reader = BufReader::new(tokio::io::stdin());
                tokio::spawn(forward_lines(reader, sender, token, None).with_current_subscriber());
            }
            Source::File(path) => {
                let file = tokio::fs::File::open(path).await?;
                let routing_key = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
                tokio::spawn(
                    forward_lines(BufReader::new(file), sender, token, routing_key)
                        .with_current_subscriber(),
                );
            }
        }

        Ok(receiver)
    }

    fn name(&self) -> &'static str {
        "lines"
    }
}
