// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod account_name;
pub mod distinct_name;
pub mod factory;
pub mod hourly_log;
pub mod log_worker;
pub mod metric;
pub mod store;

pub use account_name::AccountNameWorker;
pub use distinct_name::DistinctNameWorker;
pub use factory::WorkerFactory;
pub use hourly_log::HourlyLogWorker;
pub use log_worker::LogWorker;
pub use metric::CountMetric;
pub use store::{
    AccountTable, DocumentCollection, EventIndex, InMemoryAccountTable, InMemoryDocumentCollection,
    InMemoryEventIndex, MetricStores, StoredEvent,
};
