use std::{
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use anyhow::{bail, Context as _, Result};
use clap::Parser;
use tonegraph::prelude::*;

/// Play a tone through an oscillator, a gain and the destination
#[derive(Debug, Parser)]
#[command(name = "tone")]
struct Options {
    /// Oscillator frequency in Hz
    #[arg(long, default_value_t = 440.0)]
    frequency: f64,

    /// Linear gain applied after the oscillator
    #[arg(long, default_value_t = 0.0625)]
    gain: f64,

    /// sine, square, sawtooth, falling_sawtooth or triangle
    #[arg(long, default_value = "sine")]
    waveform: Waveform,

    /// How long to play for, in seconds
    #[arg(long, default_value_t = 1.0)]
    duration: f64,

    /// Sample rate to ask the device for
    #[arg(long, default_value_t = 44_100)]
    sample_rate: usize,

    /// Output channels to ask the device for
    #[arg(long, default_value_t = 2)]
    channels: usize,

    /// Index of the output device, or the default device if absent
    #[arg(long)]
    output_device: Option<usize>,

    /// Index of an input device to capture from
    #[arg(long)]
    input_device: Option<usize>,

    /// Render to a WAV file instead of playing
    #[arg(long)]
    render: Option<PathBuf>,
}

struct Tone {
    oscillator: Oscillator,
    _gain: Gain,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();

    if !options.duration.is_finite() || options.duration < 0.0 {
        bail!("duration must be a positive number of seconds");
    }

    if options.channels == 0 {
        bail!("at least one channel is required");
    }

    match &options.render {
        Some(path) => render(&options, path),
        None => play(&options),
    }
}

fn create_tone(context: &dyn Context, options: &Options) -> Tone {
    let channel_count = 1;

    let oscillator = Oscillator::new(
        context,
        options.frequency,
        options.waveform.clone(),
        channel_count,
    );

    let mut gain = Gain::new(context, channel_count);
    gain.gain().set_value(options.gain);

    connect_nodes!(oscillator => gain => context.destination());

    Tone {
        oscillator,
        _gain: gain,
    }
}

fn play(options: &Options) -> Result<()> {
    let output = AudioStreamConfig {
        device_index: options.output_device,
        desired_channels: options.channels,
        desired_sample_rate: options.sample_rate,
    };

    let input = options.input_device.map(|index| {
        AudioStreamConfig::new(options.channels, options.sample_rate).with_device_index(index)
    });

    let mut device = AudioDevice::open(input, output).context("couldn't open an audio device")?;

    let (mut context, process) = create_engine_with_options(
        EngineOptions::default()
            .with_sample_rate(device.sample_rate())
            .with_channel_count(device.output_channel_count()),
    );

    let mut tone = create_tone(context.as_ref(), options);
    tone.oscillator.start_now()?;

    context.start();
    device.start(process)?;

    thread::sleep(Duration::from_secs_f64(options.duration));

    tone.oscillator.stop_now();
    context.stop();

    thread::sleep(Duration::from_millis(100));

    device.stop()?;

    Ok(())
}

fn render(options: &Options, path: &Path) -> Result<()> {
    let (mut context, mut process) = create_engine_with_options(
        EngineOptions::default()
            .with_sample_rate(options.sample_rate)
            .with_channel_count(options.channels),
    );

    let mut tone = create_tone(context.as_ref(), options);
    tone.oscillator.start_now()?;
    tone.oscillator
        .stop_at_time(Timestamp::from_seconds(options.duration));

    context.start();

    let buffer = render_offline(
        process.as_mut(),
        Duration::from_secs_f64(options.duration),
        options.channels,
        options.sample_rate,
    );

    context.stop();

    write_wav(&buffer, path, WavOptions::default())
        .with_context(|| format!("couldn't write {}", path.display()))?;

    log::info!(
        "Rendered {:.2} s to {}",
        buffer.length_in_seconds(),
        path.display()
    );

    Ok(())
}
