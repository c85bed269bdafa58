//! The types most programs need
//!
//! ```rust
//! use tonegraph::prelude::*;
//! ```

pub use crate::{
    connect_nodes, create_engine, create_engine_with_options, render_offline, write_wav,
    AudioBuffer, AudioParameter, AudioProcess, AudioStreamConfig, BorrowedAudioBuffer,
    CommandQueue, Context, Destination, EngineOptions, Error, Gain, GraphNode, Level,
    MutableBorrowedAudioBuffer, NotifierStatus, Oscillator, OwnedAudioBuffer, PlaybackState,
    Result, SampleLocation, Timestamp, WavOptions, Waveform,
};

#[cfg(feature = "device")]
pub use crate::{device_list, AudioDevice};
