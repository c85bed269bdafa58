#![warn(missing_docs)]

//! tonegraph is a small real-time audio graph engine
//!
//! You can use it to:
//! - Create a context with a destination
//! - Create oscillator and gain nodes
//! - Connect the nodes together
//! - Schedule oscillators to start and stop with sample accuracy
//! - Automate parameters
//! - Drive the graph from an audio device, or render it offline
//!
//! # Example
//!
//! ```rust
//! use tonegraph::prelude::*;
//!
//! let sample_rate = 48_000;
//! let (mut context, mut process) = create_engine(sample_rate);
//!
//! let channel_count = 1;
//! let mut oscillator = Oscillator::sine(context.as_ref(), 440.0, channel_count);
//! let mut gain = Gain::new(context.as_ref(), channel_count);
//! gain.gain().set_value(0.0625);
//!
//! connect_nodes!(oscillator => gain => context.destination());
//!
//! oscillator.start_now().unwrap();
//! context.start();
//!
//! // Call `process.process(...)` from a device callback, or use
//! // `render_offline` to render into a buffer
//! ```

mod buffer;
mod commands;
mod device;
mod engine;
mod error;
mod graph;
mod nodes;
mod offline;
mod parameter;
mod realtime;
mod utility;

pub mod prelude;

pub(crate) use commands::Command;

pub use buffer::AudioBuffer;
pub use buffer::BorrowedAudioBuffer;
pub use buffer::FrameIterator;
pub use buffer::MutableBorrowedAudioBuffer;
pub use buffer::OwnedAudioBuffer;
pub use buffer::SampleLocation;
pub use buffer::SampleRange;

#[cfg(feature = "device")]
pub use device::{device_list, AudioDevice, AudioDeviceInfo};
pub use device::AudioStreamConfig;
pub use device::DeviceRenderer;

pub use engine::create_engine;
pub use engine::create_engine_with_options;
pub use engine::AudioProcess;
pub use engine::CommandQueue;
pub use engine::Context;
pub use engine::EngineOptions;
pub use engine::NotifierStatus;

pub use error::{Error, Result};

pub use graph::GraphNode;

pub use nodes::Destination;
pub use nodes::Gain;
pub use nodes::Oscillator;
pub use nodes::ParseWaveformError;
pub use nodes::PlaybackState;
pub use nodes::Waveform;

pub use offline::{render_offline, write_wav, WavOptions};

pub use parameter::AudioParameter;
pub use parameter::ParameterRange;

pub use utility::Level;
pub use utility::ParseLevelError;
pub use utility::Timestamp;
