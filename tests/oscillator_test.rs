use approx::assert_relative_eq;
use tonegraph::{
    connect_nodes, create_engine, AudioBuffer, AudioProcess, Context, Error, Level, Oscillator,
    OwnedAudioBuffer, PlaybackState, SampleLocation, Timestamp, Waveform,
};

const SAMPLE_RATE: usize = 48_000;

struct Fixture {
    context: Box<dyn Context>,
    audio_process: Box<dyn AudioProcess + Send>,
    oscillator: Oscillator,
}

impl Fixture {
    fn new(frequency: f64, waveform: Waveform) -> Self {
        let (mut context, audio_process) = create_engine(SAMPLE_RATE);

        let oscillator = Oscillator::new(context.as_ref(), frequency, waveform, 1);

        connect_nodes!(oscillator => context.destination());

        context.start();

        Self {
            context,
            audio_process,
            oscillator,
        }
    }

    /// An oscillator whose output is a constant while it's playing
    fn with_constant_output(value: f64) -> Self {
        let mut fixture = Self::new(440.0, Waveform::Sine);
        fixture.oscillator.gain().set_value(0.0);
        fixture.oscillator.bias().set_value(value);
        fixture
    }

    fn process_seconds(&mut self, seconds: f64) -> OwnedAudioBuffer {
        let frame_count = (seconds * SAMPLE_RATE as f64).ceil() as usize;
        let channel_count = self.context.channel_count();

        let input_buffer = OwnedAudioBuffer::new(frame_count, channel_count, SAMPLE_RATE);
        let mut output_buffer = OwnedAudioBuffer::new(frame_count, channel_count, SAMPLE_RATE);

        self.audio_process.process(&input_buffer, &mut output_buffer);

        output_buffer
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.context.stop();
    }
}

fn count_rising_zero_crossings(samples: &[f32]) -> usize {
    samples
        .windows(2)
        .filter(|pair| pair[0] < 0.0 && pair[1] >= 0.0)
        .count()
}

#[test]
fn silent_until_started() {
    let mut fixture = Fixture::new(440.0, Waveform::Sine);

    let output_buffer = fixture.process_seconds(0.1);

    assert!(output_buffer.is_silent());
    assert_eq!(fixture.oscillator.playback_state(), PlaybackState::Unscheduled);
}

#[test]
fn plays_a_full_scale_sine() {
    let mut fixture = Fixture::new(1_000.0, Waveform::Sine);

    fixture.oscillator.start_now().unwrap();

    let output_buffer = fixture.process_seconds(0.1);
    let samples = output_buffer.get_channel_data(SampleLocation::channel(0));

    let peak = samples.iter().fold(0.0_f32, |peak, sample| peak.max(sample.abs()));
    assert_relative_eq!(peak, 1.0, epsilon = 0.01);

    assert_eq!(fixture.oscillator.playback_state(), PlaybackState::Playing);
    assert!(fixture.oscillator.is_playing_or_scheduled());
}

#[test]
fn mono_output_fills_every_destination_channel() {
    let mut fixture = Fixture::new(1_000.0, Waveform::Triangle);

    fixture.oscillator.start_now().unwrap();

    let output_buffer = fixture.process_seconds(0.1);

    assert_eq!(output_buffer.channel_count(), 2);
    assert!(!output_buffer.channel_is_silent(0));
    assert_eq!(
        output_buffer.get_channel_data(SampleLocation::channel(0)),
        output_buffer.get_channel_data(SampleLocation::channel(1))
    );
}

#[test]
fn frequency_sets_the_period() {
    let mut fixture = Fixture::new(500.0, Waveform::Square);

    fixture.oscillator.start_now().unwrap();

    let output_buffer = fixture.process_seconds(1.0);
    let crossings =
        count_rising_zero_crossings(output_buffer.get_channel_data(SampleLocation::channel(0)));

    assert!((498..=501).contains(&crossings), "{crossings} crossings");
}

#[test]
fn detune_shifts_the_frequency() {
    let mut fixture = Fixture::new(500.0, Waveform::Sine);

    fixture.oscillator.detune().set_value(1_200.0);
    fixture.oscillator.start_now().unwrap();

    let output_buffer = fixture.process_seconds(1.0);
    let crossings =
        count_rising_zero_crossings(output_buffer.get_channel_data(SampleLocation::channel(0)));

    assert!((998..=1_001).contains(&crossings), "{crossings} crossings");
}

#[test]
fn starts_at_the_scheduled_time() {
    let mut fixture = Fixture::with_constant_output(0.5);

    fixture
        .oscillator
        .start_at_time(Timestamp::from_seconds(0.25))
        .unwrap();

    let output_buffer = fixture.process_seconds(0.5);
    let samples = output_buffer.get_channel_data(SampleLocation::channel(0));

    let start_frame = SAMPLE_RATE / 4;

    assert!(samples[..start_frame - 1].iter().all(|sample| *sample == 0.0));
    assert!(samples[start_frame + 1..].iter().all(|sample| *sample == 0.5));
}

#[test]
fn stops_at_the_scheduled_time() {
    let mut fixture = Fixture::with_constant_output(0.5);

    fixture.oscillator.start_now().unwrap();
    fixture
        .oscillator
        .stop_at_time(Timestamp::from_seconds(0.5));

    let output_buffer = fixture.process_seconds(1.0);
    let samples = output_buffer.get_channel_data(SampleLocation::channel(0));

    let stop_frame = SAMPLE_RATE / 2;

    assert!(samples[..stop_frame - 1].iter().all(|sample| *sample == 0.5));
    assert!(samples[stop_frame + 1..].iter().all(|sample| *sample == 0.0));

    assert_eq!(fixture.oscillator.playback_state(), PlaybackState::Finished);
    assert!(!fixture.oscillator.is_playing_or_scheduled());
}

#[test]
fn starting_twice_is_an_error() {
    let mut fixture = Fixture::new(440.0, Waveform::Sine);

    assert!(fixture.oscillator.start_now().is_ok());
    assert!(matches!(
        fixture.oscillator.start_now(),
        Err(Error::InvalidState)
    ));
}

#[test]
fn cant_restart_after_finishing() {
    let mut fixture = Fixture::with_constant_output(0.5);

    fixture.oscillator.start_now().unwrap();
    fixture.oscillator.stop_now();
    fixture.process_seconds(0.1);

    assert!(matches!(
        fixture.oscillator.start_now(),
        Err(Error::InvalidState)
    ));
}

#[test]
fn stopping_before_starting_never_plays() {
    let mut fixture = Fixture::with_constant_output(0.5);

    fixture.oscillator.stop_now();

    assert!(matches!(
        fixture
            .oscillator
            .start_at_time(Timestamp::from_seconds(0.1)),
        Err(Error::InvalidState)
    ));

    let output_buffer = fixture.process_seconds(0.5);

    assert!(output_buffer.is_silent());
    assert_eq!(fixture.oscillator.playback_state(), PlaybackState::Finished);
}

#[test]
fn starting_after_a_stop_is_an_error_whether_or_not_audio_has_run() {
    let mut fixture = Fixture::with_constant_output(0.5);
    fixture.oscillator.stop_now();
    fixture.process_seconds(0.1);

    assert!(matches!(
        fixture.oscillator.start_now(),
        Err(Error::InvalidState)
    ));

    let mut fixture = Fixture::with_constant_output(0.5);
    fixture.oscillator.stop_now();

    assert!(matches!(
        fixture.oscillator.start_now(),
        Err(Error::InvalidState)
    ));

    let output_buffer = fixture.process_seconds(0.1);
    assert!(output_buffer.is_silent());
}

#[test]
fn dropping_the_oscillator_silences_it() {
    let mut fixture = Fixture::with_constant_output(0.5);
    fixture.oscillator.start_now().unwrap();

    let output_buffer = fixture.process_seconds(0.1);
    assert!(!output_buffer.is_silent());

    let replacement = Oscillator::sine(fixture.context.as_ref(), 440.0, 1);
    drop(std::mem::replace(&mut fixture.oscillator, replacement));

    let output_buffer = fixture.process_seconds(0.1);
    assert!(output_buffer.is_silent());
}

#[test]
fn plays_custom_harmonics() {
    let (mut context, mut audio_process) = create_engine(SAMPLE_RATE);

    let harmonics = [Level::unity(), Level::from_db(-6.0), Level::from_db(-12.0)];
    let mut oscillator = Oscillator::with_harmonics(context.as_ref(), 250.0, 1, &harmonics);

    connect_nodes!(oscillator => context.destination());

    oscillator.start_now().unwrap();
    context.start();

    let input_buffer = OwnedAudioBuffer::new(SAMPLE_RATE, 2, SAMPLE_RATE);
    let mut output_buffer = OwnedAudioBuffer::new(SAMPLE_RATE, 2, SAMPLE_RATE);
    audio_process.process(&input_buffer, &mut output_buffer);

    let samples = output_buffer.get_channel_data(SampleLocation::channel(0));
    let peak = samples.iter().fold(0.0_f32, |peak, sample| peak.max(sample.abs()));

    assert_relative_eq!(peak, 1.0, epsilon = 0.01);
    let crossings = count_rising_zero_crossings(samples);
    assert!((249..=250).contains(&crossings), "{crossings} crossings");
}

fn proportion_above(samples: &[f32], threshold: f32) -> f64 {
    let count = samples
        .iter()
        .filter(|sample| sample.abs() > threshold)
        .count();

    count as f64 / samples.len() as f64
}

#[test]
fn changing_the_waveform_while_playing() {
    let mut fixture = Fixture::new(100.0, Waveform::Sine);

    fixture.oscillator.start_now().unwrap();

    let output_buffer = fixture.process_seconds(0.5);
    let samples = output_buffer.get_channel_data(SampleLocation::channel(0));
    assert!(proportion_above(samples, 0.7) < 0.6);

    fixture.oscillator.set_waveform(Waveform::Square);
    assert_eq!(fixture.oscillator.waveform(), &Waveform::Square);

    let output_buffer = fixture.process_seconds(0.5);
    let samples = output_buffer.get_channel_data(SampleLocation::channel(0));
    assert!(proportion_above(samples, 0.7) > 0.9);

    assert_eq!(fixture.oscillator.playback_state(), PlaybackState::Playing);
}
