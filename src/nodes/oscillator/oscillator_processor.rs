use crossbeam::channel::{Receiver, Sender};
use itertools::izip;

use crate::{
    graph::{DspProcessor, ProcessContext},
    utility::EventProcessor,
    SampleLocation,
};

use super::{
    oscillator_event::{OscillatorEvent, OscillatorEventType},
    playback_state::{PlaybackState, SharedPlaybackState},
};

const MAXIMUM_PENDING_EVENTS: usize = 16;
const CENTS_PER_OCTAVE: f64 = 1200.0;

pub struct OscillatorProcessor {
    phase: f64,
    wavetable: Vec<f64>,
    sample_rate: usize,
    playback_state: SharedPlaybackState,
    event_processor: EventProcessor<OscillatorEvent>,
    retired_wavetable_tx: Sender<Vec<f64>>,
}

impl OscillatorProcessor {
    pub fn new(
        wavetable: Vec<f64>,
        sample_rate: usize,
        playback_state: SharedPlaybackState,
        event_receiver: Receiver<OscillatorEvent>,
        retired_wavetable_tx: Sender<Vec<f64>>,
    ) -> Self {
        debug_assert!(!wavetable.is_empty());

        Self {
            phase: 0.0,
            wavetable,
            sample_rate,
            playback_state,
            event_processor: EventProcessor::with_capacity(
                MAXIMUM_PENDING_EVENTS,
                event_receiver,
                sample_rate,
            ),
            retired_wavetable_tx,
        }
    }

    fn increment_phase(&mut self, frequency: f64) {
        self.phase += frequency / self.sample_rate as f64;
        self.phase -= self.phase.floor();
    }

    fn get_value(&self) -> f64 {
        let offset = self.phase * self.wavetable.len() as f64;

        let index_before = (offset.floor() as usize) % self.wavetable.len();
        let index_after = (index_before + 1) % self.wavetable.len();

        let weighting = offset - offset.floor();
        interpolate(
            self.wavetable[index_before],
            self.wavetable[index_after],
            weighting,
        )
    }

    fn process_event(&mut self, event: OscillatorEvent) {
        let state = self.playback_state.get();

        match (event.into_event_type(), state) {
            (
                OscillatorEventType::Start,
                PlaybackState::Unscheduled | PlaybackState::Scheduled,
            ) => {
                self.phase = 0.0;
                self.playback_state.set(PlaybackState::Playing);
            }
            (OscillatorEventType::Stop, PlaybackState::Finished) => (),
            (OscillatorEventType::Stop, _) => self.playback_state.set(PlaybackState::Finished),
            (OscillatorEventType::SetWavetable(wavetable), _) => {
                debug_assert!(!wavetable.is_empty());
                let retired = std::mem::replace(&mut self.wavetable, wavetable);
                let _ = self.retired_wavetable_tx.try_send(retired);
            }
            _ => (),
        }
    }

    fn render(&mut self, context: &mut ProcessContext, start_frame: usize, end_frame: usize) {
        let frame_count = context.output_buffer.frame_count();
        let parameters = context.parameters;

        let frequency = &parameters.get_parameter_values("frequency", frame_count)
            [start_frame..end_frame];
        let detune =
            &parameters.get_parameter_values("detune", frame_count)[start_frame..end_frame];
        let gain = &parameters.get_parameter_values("gain", frame_count)[start_frame..end_frame];
        let bias = &parameters.get_parameter_values("bias", frame_count)[start_frame..end_frame];

        let channel_data = context
            .output_buffer
            .get_channel_data_mut(SampleLocation::channel(0));
        let channel_data = &mut channel_data[start_frame..end_frame];

        for (sample, frequency, detune, gain, bias) in izip!(
            channel_data.iter_mut(),
            frequency.iter(),
            detune.iter(),
            gain.iter(),
            bias.iter()
        ) {
            *sample = (self.get_value() * gain + bias) as f32;

            let frequency = frequency * (detune / CENTS_PER_OCTAVE).exp2();
            self.increment_phase(frequency);
        }
    }
}

fn interpolate(a: f64, b: f64, amount_of_b: f64) -> f64 {
    (1.0 - amount_of_b) * a + amount_of_b * b
}

impl DspProcessor for OscillatorProcessor {
    fn process_audio(&mut self, context: &mut ProcessContext) {
        debug_assert_eq!(self.sample_rate, context.output_buffer.sample_rate());

        context.output_buffer.clear();

        self.event_processor.receive_events();

        let frame_count = context.output_buffer.frame_count();
        let start_time = *context.start_time;
        let mut current_time = start_time;
        let mut position = 0;

        while position < frame_count {
            let (end_frame, event) =
                self.event_processor
                    .next_event(&start_time, &current_time, frame_count);

            let end_frame = end_frame.max(position);

            if self.playback_state.get() == PlaybackState::Playing {
                self.render(context, position, end_frame);
            }

            position = end_frame;
            current_time = start_time.incremented_by_samples(position, self.sample_rate);

            if let Some(event) = event {
                self.process_event(event);
            }
        }

        let channel_count = context.output_buffer.channel_count();

        (1..channel_count).for_each(|channel| {
            context.output_buffer.duplicate_channel(
                SampleLocation::channel(0),
                channel,
                frame_count,
            );
        });
    }
}
