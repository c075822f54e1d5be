// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod adapter;
pub mod failure;
pub mod worker;

pub use adapter::{Adapter, MessageReceiver};
pub use crate::config::WorkerRegistry;
pub use failure::{FailureHandler, LogOnlyFailureHandler};
pub use worker::Worker;
