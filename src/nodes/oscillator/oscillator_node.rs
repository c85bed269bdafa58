use crossbeam::channel::{Receiver, Sender};

use crate::{
    commands::Id,
    graph::{DspParameters, GraphNode},
    parameter::{AudioParameter, ParameterRange},
    Context, Error, Level, Result, Timestamp,
};

use super::{
    oscillator_event::OscillatorEvent,
    oscillator_processor::OscillatorProcessor,
    playback_state::{PlaybackState, SharedPlaybackState},
    waveform::Waveform,
};

/// A scheduled source that plays a periodic waveform
///
/// The oscillator is silent until it is started and after it is stopped. It
/// can only be started once, and can't be started once a stop has been
/// requested.
pub struct Oscillator {
    /// The node in the graph
    pub node: GraphNode,
    frequency: AudioParameter,
    detune: AudioParameter,
    gain: AudioParameter,
    bias: AudioParameter,
    waveform: Waveform,
    start_requested: bool,
    stop_requested: bool,
    playback_state: SharedPlaybackState,
    event_transmitter: Sender<OscillatorEvent>,
    retired_wavetable_rx: Receiver<Vec<f64>>,
}

const MIN_FREQUENCY: f64 = 0.0;
const MAX_FREQUENCY: f64 = 20_000.0;
const MAX_DETUNE: f64 = 4_800.0;
const DEFAULT_GAIN: f64 = 1.0;
const DEFAULT_BIAS: f64 = 0.0;
const RETIRED_WAVETABLE_CAPACITY: usize = 16;

impl Oscillator {
    /// Create an oscillator
    pub fn new(
        context: &dyn Context,
        frequency: f64,
        waveform: Waveform,
        channel_count: usize,
    ) -> Self {
        debug_assert!(channel_count > 0);

        let id = Id::generate();

        let (frequency, realtime_frequency) = AudioParameter::new(
            id,
            "frequency",
            ParameterRange::new(
                frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY),
                MIN_FREQUENCY,
                MAX_FREQUENCY,
            ),
            context,
        );

        let (detune, realtime_detune) = AudioParameter::new(
            id,
            "detune",
            ParameterRange::new(0.0, -MAX_DETUNE, MAX_DETUNE),
            context,
        );

        let (gain, realtime_gain) =
            AudioParameter::new(id, "gain", ParameterRange::unbounded(DEFAULT_GAIN), context);

        let (bias, realtime_bias) =
            AudioParameter::new(id, "bias", ParameterRange::unbounded(DEFAULT_BIAS), context);

        let (event_transmitter, event_receiver) = crossbeam::channel::unbounded();
        let (retired_wavetable_tx, retired_wavetable_rx) =
            crossbeam::channel::bounded(RETIRED_WAVETABLE_CAPACITY);
        let playback_state = SharedPlaybackState::default();

        let processor = Box::new(OscillatorProcessor::new(
            waveform.wavetable(),
            context.sample_rate(),
            playback_state.clone(),
            event_receiver,
            retired_wavetable_tx,
        ));

        let input_count = 0;

        let node = GraphNode::new(
            id,
            context,
            input_count,
            channel_count,
            processor,
            DspParameters::new([
                realtime_frequency,
                realtime_detune,
                realtime_gain,
                realtime_bias,
            ]),
        );

        log::debug!(
            "Created {waveform:?} oscillator {} at {} Hz",
            id.as_u64(),
            frequency.range().default()
        );

        Self {
            node,
            frequency,
            detune,
            gain,
            bias,
            waveform,
            start_requested: false,
            stop_requested: false,
            playback_state,
            event_transmitter,
            retired_wavetable_rx,
        }
    }

    /// Create a sine oscillator
    pub fn sine(context: &dyn Context, frequency: f64, channel_count: usize) -> Self {
        Self::new(context, frequency, Waveform::Sine, channel_count)
    }

    /// Create an oscillator from the levels of its harmonics
    ///
    /// The first level is the fundamental.
    pub fn with_harmonics(
        context: &dyn Context,
        frequency: f64,
        channel_count: usize,
        harmonics: &[Level],
    ) -> Self {
        Self::new(
            context,
            frequency,
            Waveform::Custom(harmonics.to_vec()),
            channel_count,
        )
    }

    /// The frequency in Hz
    pub fn frequency(&mut self) -> &mut AudioParameter {
        &mut self.frequency
    }

    /// The offset from `frequency`, in cents
    pub fn detune(&mut self) -> &mut AudioParameter {
        &mut self.detune
    }

    /// The linear gain of the waveform
    pub fn gain(&mut self) -> &mut AudioParameter {
        &mut self.gain
    }

    /// A constant added to the output while playing
    pub fn bias(&mut self) -> &mut AudioParameter {
        &mut self.bias
    }

    /// The shape of the output
    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    /// Change the shape of the output
    ///
    /// The new waveform is used from the beginning of the next block. The
    /// phase carries on from where the previous waveform left it.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.retired_wavetable_rx.try_iter().for_each(drop);

        log::debug!(
            "Changing oscillator {} to {waveform:?}",
            self.node.id().as_u64()
        );

        self.send_event(OscillatorEvent::set_wavetable(waveform.wavetable()));
        self.waveform = waveform;
    }

    /// Start at the beginning of the next block
    pub fn start_now(&mut self) -> Result<()> {
        self.start_at_time(Timestamp::zero())
    }

    /// Start at a time
    ///
    /// Returns `Error::InvalidState` if a start or a stop has already been
    /// requested.
    pub fn start_at_time(&mut self, start_time: Timestamp) -> Result<()> {
        if self.start_requested || self.stop_requested {
            return Err(Error::InvalidState);
        }

        self.start_requested = true;
        self.playback_state.set(PlaybackState::Scheduled);
        self.send_event(OscillatorEvent::start(start_time));

        Ok(())
    }

    /// Stop at the beginning of the next block
    pub fn stop_now(&mut self) {
        self.stop_at_time(Timestamp::zero());
    }

    /// Stop at a time
    ///
    /// Stopping before the oscillator has started means it never plays.
    pub fn stop_at_time(&mut self, stop_time: Timestamp) {
        self.stop_requested = true;
        self.send_event(OscillatorEvent::stop(stop_time));
    }

    /// Where the oscillator is in its lifetime
    pub fn playback_state(&self) -> PlaybackState {
        self.playback_state.get()
    }

    /// Whether the oscillator is playing or waiting to start
    pub fn is_playing_or_scheduled(&self) -> bool {
        matches!(
            self.playback_state(),
            PlaybackState::Scheduled | PlaybackState::Playing
        )
    }

    fn send_event(&self, event: OscillatorEvent) {
        let _ = self.event_transmitter.send(event);
    }
}
