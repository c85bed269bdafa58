use std::{
    sync::{atomic::Ordering, Arc},
    time::Duration,
};

use crate::{
    commands::{CancelChangeRequest, Command, Id, ParameterChangeRequest},
    CommandQueue, Context, Timestamp,
};

use super::{
    parameter_change::ParameterChange,
    parameter_value::{make_parameter_value, ParameterValue},
    ParameterRange, RealtimeAudioParameter,
};

/// A parameter that can be automated with sample accuracy
///
/// Changes are sent to the audio thread and take effect when the audio
/// process reaches their time. Values outside the parameter's range are
/// clamped.
pub struct AudioParameter {
    dsp_id: Id,
    parameter_id: Id,
    value: ParameterValue,
    range: ParameterRange,
    command_queue: Box<dyn CommandQueue>,
    sent_curves: Vec<Arc<[f64]>>,
}

impl AudioParameter {
    pub(crate) fn new(
        dsp_id: Id,
        name: &'static str,
        range: ParameterRange,
        context: &dyn Context,
    ) -> (Self, RealtimeAudioParameter) {
        let parameter_id = Id::generate();
        let value = make_parameter_value(range.default());

        let realtime_parameter = RealtimeAudioParameter::new(
            parameter_id,
            name,
            value.clone(),
            context.maximum_frame_count(),
        );

        (
            Self {
                dsp_id,
                parameter_id,
                value,
                range,
                command_queue: context.get_command_queue(),
                sent_curves: Vec::new(),
            },
            realtime_parameter,
        )
    }

    /// The most recent value rendered by the audio thread
    pub fn get_value(&self) -> f64 {
        self.value.load(Ordering::Acquire)
    }

    /// The range of the parameter
    pub fn range(&self) -> ParameterRange {
        self.range
    }

    /// Set the value at the start of the next block
    pub fn set_value(&mut self, value: f64) {
        self.set_value_at_time(value, Timestamp::zero());
    }

    /// Set the value at a time
    pub fn set_value_at_time(&mut self, value: f64, at_time: Timestamp) {
        self.send_change(ParameterChange::immediate(self.range.clamp(value), at_time));
    }

    /// Ramp linearly from the value at `start_time` to `value` at `end_time`
    pub fn linear_ramp_to_value(&mut self, value: f64, start_time: Timestamp, end_time: Timestamp) {
        self.send_change(ParameterChange::linear(
            self.range.clamp(value),
            start_time,
            end_time,
        ));
    }

    /// Ramp exponentially from the value at `start_time` to `value` at `end_time`
    ///
    /// If the value at `start_time` and `value` aren't both non-zero with the
    /// same sign, the ramp is linear.
    pub fn exponential_ramp_to_value(
        &mut self,
        value: f64,
        start_time: Timestamp,
        end_time: Timestamp,
    ) {
        self.send_change(ParameterChange::exponential(
            self.range.clamp(value),
            start_time,
            end_time,
        ));
    }

    /// Approach `value` exponentially from `start_time`
    ///
    /// After each `time_constant` seconds the parameter has moved about 63%
    /// of the remaining distance. The approach continues until the next
    /// change. A time constant that isn't positive sets the value at
    /// `start_time`.
    pub fn set_target_at_time(&mut self, value: f64, start_time: Timestamp, time_constant: f64) {
        self.send_change(ParameterChange::target(
            self.range.clamp(value),
            start_time,
            time_constant,
        ));
    }

    /// Follow a curve of values spread evenly over `duration` from `start_time`
    ///
    /// Values between points are interpolated linearly and the last value is
    /// held afterwards. An empty curve is ignored.
    pub fn set_value_curve_at_time(
        &mut self,
        values: &[f64],
        start_time: Timestamp,
        duration: Duration,
    ) {
        if values.is_empty() {
            log::warn!("Ignoring an empty value curve");
            return;
        }

        let curve: Arc<[f64]> = values
            .iter()
            .map(|value| self.range.clamp(*value))
            .collect();

        // Curves are freed here once the audio thread has released them
        self.sent_curves.retain(|sent_curve| Arc::strong_count(sent_curve) > 1);
        self.sent_curves.push(Arc::clone(&curve));

        let end_time = start_time.incremented_by_seconds(duration.as_secs_f64());
        self.send_change(ParameterChange::curve(curve, start_time, end_time));
    }

    /// Cancel all changes that haven't completed by `from_time`
    pub fn cancel_scheduled_changes(&mut self, from_time: Timestamp) {
        self.command_queue
            .send(Command::CancelParameterChanges(CancelChangeRequest {
                dsp_id: self.dsp_id,
                parameter_id: self.parameter_id,
                from_time,
            }));
    }

    fn send_change(&self, change: ParameterChange) {
        self.command_queue
            .send(Command::ParameterValueChange(ParameterChangeRequest {
                dsp_id: self.dsp_id,
                parameter_id: self.parameter_id,
                change,
            }));
    }
}
