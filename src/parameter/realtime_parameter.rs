use std::sync::{atomic::Ordering, Arc};

use crate::{commands::Id, Timestamp};

use super::{
    parameter_change::{ParameterChange, ValueChangeMethod},
    parameter_value::ParameterValue,
};

const MAXIMUM_PENDING_PARAMETER_CHANGES: usize = 16;

enum Shape {
    Linear,
    Exponential,
    Target { time_constant: f64 },
    Curve(Arc<[f64]>),
}

/// A change that is being rendered
///
/// Targets have no end time and continue until the next change.
struct ActiveChange {
    start_value: f64,
    start_seconds: f64,
    end_value: f64,
    end_time: Option<Timestamp>,
    shape: Shape,
}

impl ActiveChange {
    fn progress_at(&self, seconds: f64) -> f64 {
        let duration = self
            .end_time
            .map_or(0.0, |end_time| end_time.as_seconds() - self.start_seconds);

        if duration > 0.0 {
            ((seconds - self.start_seconds) / duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    fn value_at(&self, seconds: f64) -> f64 {
        match &self.shape {
            Shape::Linear => {
                let progress = self.progress_at(seconds);
                self.start_value + (self.end_value - self.start_value) * progress
            }
            Shape::Exponential => {
                let progress = self.progress_at(seconds);
                self.start_value * (self.end_value / self.start_value).powf(progress)
            }
            Shape::Target { time_constant } => {
                let elapsed = (seconds - self.start_seconds).max(0.0);
                self.end_value
                    + (self.start_value - self.end_value) * (-elapsed / time_constant).exp()
            }
            Shape::Curve(values) => curve_value(values, self.progress_at(seconds)),
        }
    }

    fn end_frame(&self, block_start: &Timestamp, sample_rate: usize) -> Option<usize> {
        self.end_time
            .map(|end_time| frame_of(end_time, block_start, sample_rate))
    }
}

fn curve_value(values: &[f64], progress: f64) -> f64 {
    let last_index = values.len().saturating_sub(1);
    let position = progress * last_index as f64;

    let index_before = (position.floor() as usize).min(last_index);
    let index_after = (index_before + 1).min(last_index);
    let weighting = position - index_before as f64;

    match (values.get(index_before), values.get(index_after)) {
        (Some(before), Some(after)) => before + (after - before) * weighting,
        _ => 0.0,
    }
}

/// The audio thread side of an `AudioParameter`
///
/// Renders one value per frame for each block.
pub struct RealtimeAudioParameter {
    parameter_id: Id,
    name: &'static str,
    value: ParameterValue,
    current_value: f64,
    parameter_changes: Vec<ParameterChange>,
    active_change: Option<ActiveChange>,
    value_buffer: Vec<f64>,
}

fn frame_of(time: Timestamp, block_start: &Timestamp, sample_rate: usize) -> usize {
    if time <= *block_start {
        return 0;
    }

    (time - *block_start).as_sample_index(sample_rate)
}

fn can_ramp_exponentially(from: f64, to: f64) -> bool {
    from != 0.0 && to != 0.0 && from.signum() == to.signum()
}

impl RealtimeAudioParameter {
    pub fn new(
        parameter_id: Id,
        name: &'static str,
        value: ParameterValue,
        maximum_frame_count: usize,
    ) -> Self {
        let initial_value = value.load(Ordering::Acquire);

        Self {
            parameter_id,
            name,
            value,
            current_value: initial_value,
            parameter_changes: Vec::with_capacity(MAXIMUM_PENDING_PARAMETER_CHANGES),
            active_change: None,
            value_buffer: vec![initial_value; maximum_frame_count],
        }
    }

    pub fn get_id(&self) -> Id {
        self.parameter_id
    }

    pub fn get_name(&self) -> &'static str {
        self.name
    }

    pub fn get_value(&self) -> f64 {
        self.current_value
    }

    pub fn get_values(&self) -> &[f64] {
        &self.value_buffer
    }

    pub fn maximum_frame_count(&self) -> usize {
        self.value_buffer.len()
    }

    pub fn add_parameter_change(&mut self, parameter_change: ParameterChange) {
        let insert_position = self
            .parameter_changes
            .partition_point(|change| change.start_time <= parameter_change.start_time);

        self.parameter_changes
            .insert(insert_position, parameter_change);
    }

    /// Drop changes that haven't completed by `from_time`
    ///
    /// A ramp, target or curve in progress is held at its current value.
    pub fn cancel_parameter_changes(&mut self, from_time: Timestamp) {
        self.parameter_changes
            .retain(|change| change.end_time < from_time);

        if let Some(active_change) = &self.active_change {
            if !active_change
                .end_time
                .is_some_and(|end_time| end_time < from_time)
            {
                self.active_change = None;
            }
        }
    }

    pub fn process(&mut self, time: &Timestamp, frame_count: usize, sample_rate: usize) {
        let frame_count = frame_count.min(self.value_buffer.len());
        let block_start_seconds = time.as_seconds();
        let seconds_per_frame = 1.0 / sample_rate as f64;

        let mut frame = 0;

        while frame < frame_count {
            let frame_seconds = block_start_seconds + frame as f64 * seconds_per_frame;

            while let Some(change) = self.parameter_changes.first() {
                if frame_of(change.start_time, time, sample_rate) > frame {
                    break;
                }

                let change = self.parameter_changes.remove(0);
                self.begin_change(change, frame, frame_seconds, time, sample_rate);
            }

            let next_change_frame = self
                .parameter_changes
                .first()
                .map(|change| frame_of(change.start_time, time, sample_rate))
                .unwrap_or(frame_count)
                .min(frame_count);

            self.render(
                frame,
                next_change_frame,
                time,
                block_start_seconds,
                seconds_per_frame,
                sample_rate,
            );

            frame = next_change_frame;
        }

        self.value.store(self.current_value, Ordering::Release);
    }

    fn begin_change(
        &mut self,
        change: ParameterChange,
        frame: usize,
        frame_seconds: f64,
        block_start: &Timestamp,
        sample_rate: usize,
    ) {
        if let Some(active_change) = &self.active_change {
            if active_change
                .end_frame(block_start, sample_rate)
                .is_some_and(|end_frame| end_frame <= frame)
            {
                self.current_value = active_change.end_value;
                self.active_change = None;
            }
        }

        let ends_now = frame_of(change.end_time, block_start, sample_rate) <= frame;

        let shape = match change.method {
            ValueChangeMethod::Target { time_constant } if time_constant > 0.0 => {
                Shape::Target { time_constant }
            }
            ValueChangeMethod::Immediate | ValueChangeMethod::Target { .. } => {
                self.current_value = change.value;
                self.active_change = None;
                return;
            }
            _ if ends_now => {
                self.current_value = change.value;
                self.active_change = None;
                return;
            }
            ValueChangeMethod::Exponential
                if can_ramp_exponentially(self.current_value, change.value) =>
            {
                Shape::Exponential
            }
            ValueChangeMethod::Curve(values) => Shape::Curve(values),
            _ => Shape::Linear,
        };

        let end_time = match shape {
            Shape::Target { .. } => None,
            _ => Some(change.end_time),
        };

        self.active_change = Some(ActiveChange {
            start_value: self.current_value,
            start_seconds: frame_seconds,
            end_value: change.value,
            end_time,
            shape,
        });
    }

    fn render(
        &mut self,
        start_frame: usize,
        end_frame: usize,
        block_start: &Timestamp,
        block_start_seconds: f64,
        seconds_per_frame: f64,
        sample_rate: usize,
    ) {
        let active_change = match &self.active_change {
            Some(active_change) => active_change,
            None => {
                self.value_buffer[start_frame..end_frame].fill(self.current_value);
                return;
            }
        };

        let change_end_frame = active_change
            .end_frame(block_start, sample_rate)
            .unwrap_or(end_frame);
        let change_frames = change_end_frame.clamp(start_frame, end_frame);

        for frame in start_frame..change_frames {
            let seconds = block_start_seconds + frame as f64 * seconds_per_frame;
            self.value_buffer[frame] = active_change.value_at(seconds);
        }

        if change_frames < end_frame {
            self.current_value = active_change.end_value;
            self.active_change = None;
            self.value_buffer[change_frames..end_frame].fill(self.current_value);
        } else if change_frames > start_frame {
            self.current_value = self.value_buffer[change_frames - 1];
        }
    }
}
