mod audio_process;
mod command_queue;
mod context;
mod engine_options;
mod root;

pub use audio_process::AudioProcess;
pub use command_queue::CommandQueue;
pub use context::{Context, NotifierStatus};
pub use engine_options::EngineOptions;
pub use root::{create_engine, create_engine_with_options};
