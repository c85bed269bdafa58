mod oscillator_event;
mod oscillator_node;
mod oscillator_processor;
mod playback_state;
mod waveform;

pub use oscillator_node::Oscillator;
pub use playback_state::PlaybackState;
pub use waveform::{ParseWaveformError, Waveform};
