// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // adapters + metrics workers
pub mod config;     // config, options + registry
pub mod engine;     // processor, consumer loops, dispatcher
pub mod errors;     // error handling
pub mod message;    // message + delivery envelope
pub mod observability;
pub mod traits;     // worker, adapter, failure handler
