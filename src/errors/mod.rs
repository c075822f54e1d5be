// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod adapter;
mod config;
mod processor;
mod worker;

pub use adapter::AdapterError;
pub use config::{ConfigError, ValidationError};
pub use processor::ProcessorError;
pub use worker::WorkerError;
