use std::time::Duration;

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, Host, SampleFormat, SampleRate, Stream, StreamConfig, SupportedBufferSize,
    SupportedStreamConfigRange,
};
use crossbeam::channel::Sender;

use super::{AudioStreamConfig, DeviceRenderer};
use crate::{AudioProcess, Error, Result};

const INPUT_QUEUE_CAPACITY: usize = 1024 * 1024;
const MAXIMUM_CALLBACK_FRAMES: usize = 4096;
const INPUT_LATENCY: Duration = Duration::from_millis(1);

/// A device that can be listed and addressed by [`AudioStreamConfig::device_index`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioDeviceInfo {
    /// Position in the device list
    pub index: usize,

    /// Name reported by the host
    pub name: String,

    /// Channels in the device's default input configuration
    pub input_channel_count: usize,

    /// Channels in the device's default output configuration
    pub output_channel_count: usize,

    /// Whether this is the host's default input device
    pub is_default_input: bool,

    /// Whether this is the host's default output device
    pub is_default_output: bool,
}

/// List the devices on the default host
pub fn device_list() -> Result<Vec<AudioDeviceInfo>> {
    let host = cpal::default_host();

    let default_input = host.default_input_device().and_then(|device| device.name().ok());
    let default_output = host
        .default_output_device()
        .and_then(|device| device.name().ok());

    let devices = host
        .devices()?
        .enumerate()
        .map(|(index, device)| {
            let name = device.name().unwrap_or_default();

            AudioDeviceInfo {
                index,
                input_channel_count: device
                    .default_input_config()
                    .map_or(0, |config| config.channels() as usize),
                output_channel_count: device
                    .default_output_config()
                    .map_or(0, |config| config.channels() as usize),
                is_default_input: default_input.as_ref() == Some(&name),
                is_default_output: default_output.as_ref() == Some(&name),
                name,
            }
        })
        .collect();

    Ok(devices)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum StreamDirection {
    Input,
    Output,
}

struct OpenedDevice {
    device: Device,
    config: StreamConfig,
    maximum_frame_count: usize,
}

struct RunningStreams {
    output: Stream,
    input: Option<Stream>,
}

/// An output stream, and optional input stream, that drive an [`AudioProcess`]
pub struct AudioDevice {
    output: OpenedDevice,
    input: Option<OpenedDevice>,
    streams: Option<RunningStreams>,
}

impl AudioDevice {
    /// Open devices on the default host
    ///
    /// Streams aren't created until [`AudioDevice::start`].
    pub fn open(input: Option<AudioStreamConfig>, output: AudioStreamConfig) -> Result<Self> {
        let host = cpal::default_host();
        log::info!("Using audio host: {}", host.id().name());

        let output = open_device(&host, &output, StreamDirection::Output)?;

        let input = match input {
            Some(input) => match open_device(&host, &input, StreamDirection::Input) {
                Ok(opened) => Some(opened),
                Err(error) => {
                    log::warn!("Input device unavailable, capturing silence: {error}");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            output,
            input,
            streams: None,
        })
    }

    /// The sample rate of the output stream
    pub fn sample_rate(&self) -> usize {
        self.output.config.sample_rate.0 as usize
    }

    /// The number of channels in the output stream
    pub fn output_channel_count(&self) -> usize {
        self.output.config.channels as usize
    }

    /// Whether streams are running
    pub fn is_running(&self) -> bool {
        self.streams.is_some()
    }

    /// Start driving an audio process
    pub fn start(&mut self, audio_process: Box<dyn AudioProcess + Send>) -> Result<()> {
        if self.is_running() {
            return Err(Error::InvalidState);
        }

        let sample_rate = self.sample_rate();

        let (input_stream, input) = match &self.input {
            Some(input) if input.config.sample_rate.0 as usize == sample_rate => {
                let (sender, receiver) = crossbeam::channel::bounded(INPUT_QUEUE_CAPACITY);
                let channel_count = input.config.channels as usize;
                let stream = build_input_stream(input, sender)?;
                (Some(stream), Some((receiver, channel_count)))
            }
            Some(input) => {
                log::warn!(
                    "Input runs at {} Hz but output runs at {sample_rate} Hz, capturing silence",
                    input.config.sample_rate.0
                );
                (None, None)
            }
            None => (None, None),
        };

        let mut renderer = DeviceRenderer::new(
            audio_process,
            self.output.maximum_frame_count,
            self.output_channel_count(),
            sample_rate,
            input,
        );

        let output_stream = self.output.device.build_output_stream(
            &self.output.config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| renderer.render(data),
            |error| log::error!("Output stream error: {error}"),
            None,
        )?;

        if let Some(stream) = &input_stream {
            stream.play()?;
        }

        output_stream.play()?;

        log::debug!("Started audio device at {sample_rate} Hz");

        self.streams = Some(RunningStreams {
            output: output_stream,
            input: input_stream,
        });

        Ok(())
    }

    /// Stop the streams and release the audio process
    pub fn stop(&mut self) -> Result<()> {
        let Some(streams) = self.streams.take() else {
            return Ok(());
        };

        streams.output.pause()?;

        if let Some(input) = &streams.input {
            input.pause()?;
        }

        log::debug!("Stopped audio device");

        Ok(())
    }
}

impl Drop for AudioDevice {
    fn drop(&mut self) {
        if let Err(error) = self.stop() {
            log::warn!("Couldn't stop audio device: {error}");
        }
    }
}

fn open_device(
    host: &Host,
    stream_config: &AudioStreamConfig,
    direction: StreamDirection,
) -> Result<OpenedDevice> {
    let device = find_device(host, stream_config.device_index, direction)?;
    let supported = choose_config(&device, stream_config, direction)?;

    let maximum_frame_count = match supported.buffer_size() {
        SupportedBufferSize::Range { max, .. } => (*max as usize).clamp(1, MAXIMUM_CALLBACK_FRAMES),
        SupportedBufferSize::Unknown => MAXIMUM_CALLBACK_FRAMES,
    };

    let config = supported.config();

    log::info!(
        "Connecting to {} device {} with {} channels at {} Hz",
        match direction {
            StreamDirection::Input => "input",
            StreamDirection::Output => "output",
        },
        device.name().unwrap_or_default(),
        config.channels,
        config.sample_rate.0
    );

    Ok(OpenedDevice {
        device,
        config,
        maximum_frame_count,
    })
}

fn find_device(
    host: &Host,
    device_index: Option<usize>,
    direction: StreamDirection,
) -> Result<Device> {
    match device_index {
        Some(index) => host
            .devices()?
            .nth(index)
            .ok_or(Error::DeviceNotFound(index)),
        None => match direction {
            StreamDirection::Input => host.default_input_device(),
            StreamDirection::Output => host.default_output_device(),
        }
        .ok_or(Error::NoDevice),
    }
}

fn choose_config(
    device: &Device,
    stream_config: &AudioStreamConfig,
    direction: StreamDirection,
) -> Result<cpal::SupportedStreamConfig> {
    let configs: Vec<SupportedStreamConfigRange> = match direction {
        StreamDirection::Input => device.supported_input_configs()?.collect(),
        StreamDirection::Output => device.supported_output_configs()?.collect(),
    };

    let desired_rate = SampleRate(stream_config.desired_sample_rate as u32);

    if let Some(config) = best_config(&configs, desired_rate, stream_config.desired_channels) {
        return Ok(config.clone().with_sample_rate(desired_rate));
    }

    let default_rate = match direction {
        StreamDirection::Input => device.default_input_config()?,
        StreamDirection::Output => device.default_output_config()?,
    }
    .sample_rate();

    log::warn!(
        "{} Hz isn't supported, falling back to {} Hz",
        desired_rate.0,
        default_rate.0
    );

    best_config(&configs, default_rate, stream_config.desired_channels)
        .map(|config| config.clone().with_sample_rate(default_rate))
        .ok_or(Error::UnsupportedConfig)
}

fn best_config(
    configs: &[SupportedStreamConfigRange],
    sample_rate: SampleRate,
    desired_channels: usize,
) -> Option<&SupportedStreamConfigRange> {
    let candidates: Vec<&SupportedStreamConfigRange> = configs
        .iter()
        .filter(|config| {
            config.sample_format() == SampleFormat::F32
                && config.min_sample_rate() <= sample_rate
                && sample_rate <= config.max_sample_rate()
        })
        .collect();

    candidates
        .iter()
        .find(|config| config.channels() as usize == desired_channels)
        .or_else(|| {
            candidates
                .iter()
                .min_by_key(|config| (config.channels() as usize).abs_diff(desired_channels))
        })
        .copied()
}

fn build_input_stream(input: &OpenedDevice, sender: Sender<f32>) -> Result<Stream> {
    let channel_count = input.config.channels as usize;
    let sample_rate = input.config.sample_rate.0 as f64;

    let latency_samples =
        channel_count * (INPUT_LATENCY.as_secs_f64() * sample_rate).ceil() as usize;

    (0..latency_samples).for_each(|_| {
        let _ = sender.try_send(0.0);
    });

    let stream = input.device.build_input_stream(
        &input.config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            for frame in data.chunks_exact(channel_count) {
                let free = sender.capacity().unwrap_or(usize::MAX) - sender.len();

                if free < channel_count {
                    break;
                }

                frame.iter().for_each(|sample| {
                    let _ = sender.try_send(*sample);
                });
            }
        },
        |error| log::error!("Input stream error: {error}"),
        None,
    )?;

    Ok(stream)
}
