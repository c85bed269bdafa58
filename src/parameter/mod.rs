mod audio_parameter;
mod parameter_change;
mod parameter_range;
mod parameter_value;
mod realtime_parameter;

pub use audio_parameter::AudioParameter;
pub use parameter_change::ParameterChange;
pub use parameter_range::ParameterRange;
#[cfg(test)]
pub use parameter_value::make_parameter_value;
pub use realtime_parameter::RealtimeAudioParameter;
