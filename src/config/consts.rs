use std::time::Duration;

/// Number of consumer loops when none is configured
pub const DEFAULT_CONCURRENCY: usize = 1;
/// Idle wait before a consumer loop gives up on new tasks
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(500);
/// Capacity of the channel between an adapter's producer and the consumer loops
pub const MESSAGE_CHANNEL_CAPACITY: usize = 64;
/// Window in which the hourly log worker accepts deliveries
pub const HOURLY_LOG_WINDOW_MINUTES: i64 = 60;
