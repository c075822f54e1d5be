pub mod consumer;
pub mod dispatcher;
pub mod processor;

pub use consumer::{LoopExit, ProcessorStats};
pub use dispatcher::{dispatch, TaskOutcome, TaskOutcomes};
pub use processor::Processor;
