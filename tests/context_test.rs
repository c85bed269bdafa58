use std::{cell::Cell, rc::Rc};

use approx::assert_relative_eq;
use tonegraph::{
    connect_nodes, create_engine, create_engine_with_options, AudioBuffer, AudioProcess,
    Context, EngineOptions, Gain, NotifierStatus, Oscillator, OwnedAudioBuffer, SampleLocation,
};

const SAMPLE_RATE: usize = 48_000;

fn process_seconds(audio_process: &mut dyn AudioProcess, seconds: f64) -> OwnedAudioBuffer {
    let frame_count = (seconds * SAMPLE_RATE as f64).ceil() as usize;
    let input_buffer = OwnedAudioBuffer::new(frame_count, 2, SAMPLE_RATE);
    let mut output_buffer = OwnedAudioBuffer::new(frame_count, 2, SAMPLE_RATE);
    audio_process.process(&input_buffer, &mut output_buffer);
    output_buffer
}

fn constant_source(context: &dyn Context, value: f64) -> Oscillator {
    let mut oscillator = Oscillator::sine(context, 440.0, 1);
    oscillator.gain().set_value(0.0);
    oscillator.bias().set_value(value);
    oscillator.start_now().unwrap();
    oscillator
}

#[test]
fn reports_its_configuration() {
    let (context, _) = create_engine_with_options(
        EngineOptions::default()
            .with_sample_rate(SAMPLE_RATE)
            .with_maximum_frame_count(256)
            .with_channel_count(1),
    );

    assert_eq!(context.sample_rate(), SAMPLE_RATE);
    assert_eq!(context.maximum_frame_count(), 256);
    assert_eq!(context.channel_count(), 1);
    assert_eq!(context.destination().channel_count(), 1);
    assert!(!context.is_running());
}

#[test]
fn time_advances_while_running() {
    let (mut context, mut audio_process) = create_engine(SAMPLE_RATE);

    process_seconds(audio_process.as_mut(), 0.5);
    assert_eq!(context.current_time().as_seconds(), 0.0);

    context.start();
    assert!(context.is_running());

    process_seconds(audio_process.as_mut(), 0.5);
    assert_relative_eq!(context.current_time().as_seconds(), 0.5, epsilon = 1e-6);

    context.stop();
    assert!(!context.is_running());

    process_seconds(audio_process.as_mut(), 0.5);
    assert_relative_eq!(context.current_time().as_seconds(), 0.5, epsilon = 1e-6);
}

#[test]
fn renders_the_smoke_test_chain() {
    let (mut context, mut audio_process) = create_engine(SAMPLE_RATE);

    let mut oscillator = Oscillator::sine(context.as_ref(), 440.0, 1);
    let mut gain = Gain::new(context.as_ref(), 1);
    gain.gain().set_value(0.0625);

    connect_nodes!(oscillator => gain => context.destination());

    oscillator.start_now().unwrap();
    context.start();

    let output_buffer = process_seconds(audio_process.as_mut(), 1.0);

    let peak = output_buffer
        .get_channel_data(SampleLocation::channel(1))
        .iter()
        .fold(0.0_f32, |peak, sample| peak.max(sample.abs()));

    assert_relative_eq!(peak, 0.0625, epsilon = 0.001);

    oscillator.stop_now();
    context.stop();
}

#[test]
fn ignores_connections_that_create_cycles() {
    let (mut context, mut audio_process) = create_engine(SAMPLE_RATE);

    let source = constant_source(context.as_ref(), 0.5);
    let first = Gain::new(context.as_ref(), 1);
    let second = Gain::new(context.as_ref(), 1);

    connect_nodes!(source => first => second => first);
    connect_nodes!(first => context.destination());

    context.start();

    let output_buffer = process_seconds(audio_process.as_mut(), 0.1);

    assert!(output_buffer
        .get_channel_data(SampleLocation::channel(0))
        .iter()
        .all(|sample| *sample == 0.5));
}

#[test]
fn disconnecting_removes_the_signal() {
    let (mut context, mut audio_process) = create_engine(SAMPLE_RATE);

    let source = constant_source(context.as_ref(), 0.5);
    let gain = Gain::new(context.as_ref(), 1);

    connect_nodes!(source => gain => context.destination());

    context.start();

    let output_buffer = process_seconds(audio_process.as_mut(), 0.1);
    assert!(!output_buffer.is_silent());

    gain.node.disconnect_from(&context.destination().node);

    let output_buffer = process_seconds(audio_process.as_mut(), 0.1);
    assert!(output_buffer.is_silent());
}

#[test]
fn notifiers_run_until_they_finish() {
    let (mut context, _) = create_engine(SAMPLE_RATE);

    let call_count = Rc::new(Cell::new(0));

    let counter = Rc::clone(&call_count);
    context.add_notifier(Box::new(move || {
        counter.set(counter.get() + 1);

        if counter.get() < 3 {
            NotifierStatus::Continue
        } else {
            NotifierStatus::Remove
        }
    }));

    (0..5).for_each(|_| context.process_notifications());

    assert_eq!(call_count.get(), 3);
}
