/// Errors returned by the engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operation isn't allowed in the node's current state
    #[error("the operation isn't valid in the current state")]
    InvalidState,

    /// There is no default audio device
    #[error("no audio device is available")]
    NoDevice,

    /// There is no audio device with the requested index
    #[error("no audio device with index {0}")]
    DeviceNotFound(usize),

    /// The device can't run with the requested configuration
    #[error("the audio device doesn't support the requested configuration")]
    UnsupportedConfig,

    /// Writing a WAV file failed
    #[error("couldn't write WAV file: {0}")]
    Wav(#[from] hound::Error),

    /// Enumerating devices failed
    #[cfg(feature = "device")]
    #[error(transparent)]
    Devices(#[from] cpal::DevicesError),

    /// Reading a device's name failed
    #[cfg(feature = "device")]
    #[error(transparent)]
    DeviceName(#[from] cpal::DeviceNameError),

    /// Reading a device's default configuration failed
    #[cfg(feature = "device")]
    #[error(transparent)]
    DefaultStreamConfig(#[from] cpal::DefaultStreamConfigError),

    /// Reading a device's supported configurations failed
    #[cfg(feature = "device")]
    #[error(transparent)]
    SupportedStreamConfigs(#[from] cpal::SupportedStreamConfigsError),

    /// Opening a stream failed
    #[cfg(feature = "device")]
    #[error(transparent)]
    BuildStream(#[from] cpal::BuildStreamError),

    /// Starting a stream failed
    #[cfg(feature = "device")]
    #[error(transparent)]
    PlayStream(#[from] cpal::PlayStreamError),

    /// Pausing a stream failed
    #[cfg(feature = "device")]
    #[error(transparent)]
    PauseStream(#[from] cpal::PauseStreamError),
}

/// A result with the engine's error type
pub type Result<T> = std::result::Result<T, Error>;
