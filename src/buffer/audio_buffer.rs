use std::time::Duration;

use super::sample_location::SampleRange;
use crate::SampleLocation;

/// Planar audio samples
///
/// Each channel is stored contiguously, so `get_channel_data` returns every
/// sample from a location to the end of that channel.
pub trait AudioBuffer {
    /// The number of channels in the buffer
    fn channel_count(&self) -> usize;

    /// The number of frames in the buffer
    fn frame_count(&self) -> usize;

    /// The sample rate of the audio in the buffer
    fn sample_rate(&self) -> usize;

    /// Get the samples from a location to the end of its channel
    fn get_channel_data(&self, sample_location: SampleLocation) -> &[f32];

    /// Get the mutable samples from a location to the end of its channel
    fn get_channel_data_mut(&mut self, sample_location: SampleLocation) -> &mut [f32];

    /// Copy part of one channel to another channel in the same buffer
    fn duplicate_channel(&mut self, source: SampleLocation, to_channel: usize, frame_count: usize);

    /// Length of the buffer in seconds
    fn length_in_seconds(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate() as f64
    }

    /// Length of the buffer as a duration
    fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.length_in_seconds())
    }

    /// Set every sample to zero
    fn clear(&mut self) {
        self.fill_with_value(0.0_f32);
    }

    /// Set every sample in a channel to a value
    fn fill_channel_with_value(&mut self, channel: usize, value: f32) {
        let data = self.get_channel_data_mut(SampleLocation::channel(channel));
        data.fill(value);
    }

    /// Set every sample to a value
    fn fill_with_value(&mut self, value: f32) {
        for channel in 0..self.channel_count() {
            self.fill_channel_with_value(channel, value);
        }
    }

    /// Check that all samples in a channel are zero
    fn channel_is_silent(&self, channel: usize) -> bool {
        let data = self.get_channel_data(SampleLocation::channel(channel));
        data.iter().all(|sample| *sample == 0.0_f32)
    }

    /// Check that all samples in the buffer are zero
    fn is_silent(&self) -> bool {
        (0..self.channel_count()).all(|channel| self.channel_is_silent(channel))
    }

    /// Check that a range fits within the buffer
    fn range_is_valid(&self, range: &SampleRange) -> bool {
        range.channel + range.channel_count <= self.channel_count()
            && range.frame + range.frame_count <= self.frame_count()
    }

    /// Set a single sample
    fn set_sample(&mut self, sample_location: SampleLocation, value: f32) {
        let data = self.get_channel_data_mut(sample_location);
        data[0] = value;
    }

    /// Add to a single sample
    fn add_sample(&mut self, sample_location: SampleLocation, value: f32) {
        let value_before = self.get_sample(sample_location);
        self.set_sample(sample_location, value + value_before)
    }

    /// Get a single sample
    fn get_sample(&self, sample_location: SampleLocation) -> f32 {
        let data = self.get_channel_data(sample_location);
        data[0]
    }

    /// Mix samples from another buffer into this one
    fn add_from(
        &mut self,
        source_buffer: &dyn AudioBuffer,
        source_location: SampleLocation,
        destination_location: SampleLocation,
        channel_count: usize,
        frame_count: usize,
    ) {
        for channel in 0..channel_count {
            let source = source_buffer.get_channel_data(source_location.offset_channels(channel));
            let source = &source[..frame_count];

            let destination =
                self.get_channel_data_mut(destination_location.offset_channels(channel));
            let destination = &mut destination[..frame_count];

            for (source_value, destination_value) in source.iter().zip(destination.iter_mut()) {
                *destination_value += *source_value;
            }
        }
    }

    /// Overwrite samples with those from another buffer
    fn copy_from(
        &mut self,
        source_buffer: &dyn AudioBuffer,
        source_location: SampleLocation,
        destination_location: SampleLocation,
        channel_count: usize,
        frame_count: usize,
    ) {
        for channel in 0..channel_count {
            let source = source_buffer.get_channel_data(source_location.offset_channels(channel));
            let source = &source[..frame_count];

            let destination =
                self.get_channel_data_mut(destination_location.offset_channels(channel));
            let destination = &mut destination[..frame_count];

            destination.copy_from_slice(source);
        }
    }

    /// Multiply every channel by a per-frame gain
    fn apply_gain(&mut self, gain: &[f64]) {
        debug_assert!(gain.len() >= self.frame_count());

        let gain = &gain[..self.frame_count()];

        if gain.iter().all(|gain| gain.abs() < 1e-9) {
            self.clear();
            return;
        }

        if gain.iter().all(|gain| (gain - 1.0).abs() < 1e-9) {
            return;
        }

        for channel in 0..self.channel_count() {
            let channel_data = self.get_channel_data_mut(SampleLocation::channel(channel));

            for (sample, gain) in channel_data.iter_mut().zip(gain.iter()) {
                *sample *= *gain as f32;
            }
        }
    }

    /// Deinterleave samples into this buffer
    fn fill_from_interleaved(
        &mut self,
        interleaved_data: &[f32],
        channel_count: usize,
        frame_count: usize,
    ) {
        let frame_count = frame_count
            .min(self.frame_count())
            .min(interleaved_data.len() / channel_count.max(1));

        for channel in 0..channel_count.min(self.channel_count()) {
            let channel_data = self.get_channel_data_mut(SampleLocation::channel(channel));

            (0..frame_count).for_each(|frame| {
                channel_data[frame] = interleaved_data[frame * channel_count + channel];
            });
        }
    }

    /// Interleave samples from this buffer
    ///
    /// Channels in the interleaved data beyond those in this buffer are left
    /// untouched.
    fn copy_to_interleaved(
        &self,
        interleaved_data: &mut [f32],
        channel_count: usize,
        frame_count: usize,
    ) {
        let frame_count = frame_count
            .min(self.frame_count())
            .min(interleaved_data.len() / channel_count.max(1));

        for channel in 0..channel_count.min(self.channel_count()) {
            let channel_data = self.get_channel_data(SampleLocation::channel(channel));

            (0..frame_count).for_each(|frame| {
                interleaved_data[frame * channel_count + channel] = channel_data[frame];
            });
        }
    }

    /// Fill a channel with a resampled channel from another buffer
    ///
    /// Uses linear interpolation. Every destination sample from
    /// `destination_location` to the end of the channel is written.
    fn sample_rate_convert_from(
        &mut self,
        audio_buffer: &dyn AudioBuffer,
        source_location: SampleLocation,
        destination_location: SampleLocation,
    ) {
        let ratio = audio_buffer.sample_rate() as f64 / self.sample_rate() as f64;

        let source_data = audio_buffer.get_channel_data(source_location);
        let destination_data = self.get_channel_data_mut(destination_location);

        if source_data.is_empty() {
            destination_data.fill(0.0);
            return;
        }

        let last_index = source_data.len() - 1;

        destination_data
            .iter_mut()
            .enumerate()
            .for_each(|(index, sample)| {
                let source_index = index as f64 * ratio;

                let index_before = (source_index.floor() as usize).min(last_index);
                let index_after = (source_index.ceil() as usize).min(last_index);

                let amount_after = (source_index - source_index.floor()) as f32;

                *sample = (1.0 - amount_after) * source_data[index_before]
                    + amount_after * source_data[index_after];
            });
    }

    /// Iterate over every sample location, channel by channel
    fn frame_iter(&self) -> FrameIterator {
        FrameIterator {
            channel: 0,
            frame: 0,
            channel_count: self.channel_count(),
            frame_count: self.frame_count(),
        }
    }
}

/// Iterates over the locations of a buffer
pub struct FrameIterator {
    channel: usize,
    frame: usize,
    channel_count: usize,
    frame_count: usize,
}

impl Iterator for FrameIterator {
    type Item = SampleLocation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.channel >= self.channel_count || self.frame >= self.frame_count {
            return None;
        }

        let location = SampleLocation::new(self.channel, self.frame);

        self.frame += 1;

        if self.frame >= self.frame_count {
            self.channel += 1;
            self.frame = 0;
        }

        Some(location)
    }
}
