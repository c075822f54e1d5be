// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Inbound message model shared by adapters and workers.
//!
//! A [`Message`] is what an adapter yields; its [`Delivery`] envelope is what
//! every worker receives, untouched, for that message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Adapter-specific envelope handed verbatim to workers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub body: Vec<u8>,
    /// Time the message arrived at the adapter.
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub routing_key: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Delivery {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            timestamp: Utc::now(),
            routing_key: None,
            headers: HashMap::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_routing_key(mut self, routing_key: impl Into<String>) -> Self {
        self.routing_key = Some(routing_key.into());
        self
    }

    /// Body rendered for log lines; invalid UTF-8 is replaced, not rejected.
    pub fn body_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One inbound message: the raw payload plus its original envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub payload: Vec<u8>,
    pub original: Delivery,
}

impl Message {
    /// Build a message whose envelope carries the same body, stamped now.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        let payload = payload.into();
        Self {
            original: Delivery::new(payload.clone()),
            payload,
        }
    }

    pub fn from_delivery(original: Delivery) -> Self {
        Self {
            payload: original.body.clone(),
            original,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_message_new_mirrors_payload_into_envelope() {
        let msg = Message::new("message 1");
        assert_eq!(msg.payload, b"message 1".to_vec());
        assert_eq!(msg.original.body, msg.payload);
        assert!(msg.original.routing_key.is_none());
    }

    #[test]
    fn test_delivery_builders() {
        let earlier = Utc::now() - Duration::minutes(90);
        let delivery = Delivery::new(vec![0xff, b'a'])
            .with_timestamp(earlier)
            .with_routing_key("metrics");

        assert_eq!(delivery.timestamp, earlier);
        assert_eq!(delivery.routing_key.as_deref(), Some("metrics"));
        assert_eq!(delivery.body_lossy(), "\u{fffd}a");
    }
}
