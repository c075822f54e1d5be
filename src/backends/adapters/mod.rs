// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Queue adapters bundled with the crate.
//!
//! Broker-backed adapters live outside this crate; these two cover local runs
//! and tests:
//!
//! - [`MemoryAdapter`]: a fixed list of messages, with failure injection for
//!   each lifecycle step
//! - [`LinesAdapter`]: newline-delimited payloads from a file or stdin

pub mod lines;
pub mod memory;

pub use lines::LinesAdapter;
pub use memory::MemoryAdapter;
