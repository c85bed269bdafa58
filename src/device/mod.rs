#[cfg(feature = "device")]
mod audio_device;
mod device_renderer;
mod stream_config;

#[cfg(feature = "device")]
pub use audio_device::{device_list, AudioDevice, AudioDeviceInfo};
pub use device_renderer::DeviceRenderer;
pub use stream_config::AudioStreamConfig;
