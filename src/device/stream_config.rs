/// The stream an [`crate::AudioDevice`] should try to open
///
/// The device falls back to its default sample rate when the desired one
/// isn't supported, and to the closest channel count when the desired one
/// isn't available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioStreamConfig {
    /// Index into the device list, or `None` for the host's default device
    pub device_index: Option<usize>,

    /// Number of channels to open
    pub desired_channels: usize,

    /// Sample rate to open the stream with, in Hz
    pub desired_sample_rate: usize,
}

impl AudioStreamConfig {
    /// A configuration for the default device
    pub fn new(desired_channels: usize, desired_sample_rate: usize) -> Self {
        Self {
            device_index: None,
            desired_channels,
            desired_sample_rate,
        }
    }

    /// Use the device at an index in the device list
    pub fn with_device_index(mut self, device_index: usize) -> Self {
        self.device_index = Some(device_index);
        self
    }
}

impl Default for AudioStreamConfig {
    fn default() -> Self {
        Self::new(2, 44_100)
    }
}
