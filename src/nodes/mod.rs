mod destination;
mod gain;
mod oscillator;

pub use destination::Destination;
pub use gain::Gain;
pub use oscillator::{Oscillator, ParseWaveformError, PlaybackState, Waveform};
