mod event_processor;
mod level;
mod timestamp;

pub use event_processor::EventProcessor;
pub use event_processor::EventProcessorEvent;
pub use level::Level;
pub use level::ParseLevelError;
pub use timestamp::Timestamp;
