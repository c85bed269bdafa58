use super::sample_location::SampleRange;
use crate::{AudioBuffer, SampleLocation};

/// A mutable buffer that refers to a portion of another buffer
pub struct MutableBorrowedAudioBuffer<'a> {
    buffer: &'a mut dyn AudioBuffer,
    range: SampleRange,
}

impl<'a> MutableBorrowedAudioBuffer<'a> {
    /// Create a slice of another audio buffer with a subset of frames
    pub fn slice_frames(
        buffer: &'a mut dyn AudioBuffer,
        frame_offset: usize,
        frame_count: usize,
    ) -> Self {
        let channel_count = buffer.channel_count();
        Self::slice(
            buffer,
            SampleRange::new(0, frame_offset, channel_count, frame_count),
        )
    }

    /// Create a slice of another audio buffer with a subset of channels
    pub fn slice_channels(
        buffer: &'a mut dyn AudioBuffer,
        channel_offset: usize,
        channel_count: usize,
    ) -> Self {
        let frame_count = buffer.frame_count();
        Self::slice(
            buffer,
            SampleRange::new(channel_offset, 0, channel_count, frame_count),
        )
    }

    /// Create a slice of another audio buffer with a subset of channels and frames
    pub fn slice_channels_and_frames(
        buffer: &'a mut dyn AudioBuffer,
        channel_count: usize,
        frame_count: usize,
    ) -> Self {
        Self::slice(
            buffer,
            SampleRange::channel_and_frame_count(channel_count, frame_count),
        )
    }

    /// Create a slice of another audio buffer with a subset of channels and frames
    pub fn slice(buffer: &'a mut dyn AudioBuffer, range: SampleRange) -> Self {
        assert!(buffer.range_is_valid(&range));
        Self { buffer, range }
    }
}

impl AudioBuffer for MutableBorrowedAudioBuffer<'_> {
    fn channel_count(&self) -> usize {
        self.range.channel_count
    }

    fn frame_count(&self) -> usize {
        self.range.frame_count
    }

    fn sample_rate(&self) -> usize {
        self.buffer.sample_rate()
    }

    fn get_channel_data(&self, sample_location: SampleLocation) -> &[f32] {
        let data = self.buffer.get_channel_data(
            sample_location
                .offset_frames(self.range.frame)
                .offset_channels(self.range.channel),
        );
        let end = self.range.frame_count - sample_location.frame;
        &data[0..end]
    }

    fn get_channel_data_mut(&mut self, sample_location: SampleLocation) -> &mut [f32] {
        let data = self.buffer.get_channel_data_mut(
            sample_location
                .offset_frames(self.range.frame)
                .offset_channels(self.range.channel),
        );
        let end = self.range.frame_count - sample_location.frame;
        &mut data[0..end]
    }

    fn duplicate_channel(&mut self, source: SampleLocation, to_channel: usize, frame_count: usize) {
        self.buffer.duplicate_channel(
            source
                .offset_frames(self.range.frame)
                .offset_channels(self.range.channel),
            to_channel + self.range.channel,
            frame_count,
        );
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::OwnedAudioBuffer;

    #[test]
    fn translates_location_when_setting_samples() {
        let mut original_buffer = OwnedAudioBuffer::new(1_000, 2, 44_100);

        let slice_offset = 50;
        let mut slice =
            MutableBorrowedAudioBuffer::slice_frames(&mut original_buffer, slice_offset, 100);

        let offset_location = SampleLocation::new(0, 12);
        slice.set_sample(offset_location, 0.12);

        let original_location = SampleLocation::new(0, 12 + slice_offset);
        assert_relative_eq!(original_buffer.get_sample(original_location), 0.12);
    }

    #[test]
    fn clearing_a_slice_leaves_the_rest() {
        let mut original_buffer = OwnedAudioBuffer::new(20, 2, 44_100);
        original_buffer.fill_with_value(1.0);

        let mut slice = MutableBorrowedAudioBuffer::slice_channels_and_frames(
            &mut original_buffer,
            1,
            10,
        );
        slice.clear();

        assert_relative_eq!(original_buffer.get_sample(SampleLocation::new(0, 9)), 0.0);
        assert_relative_eq!(original_buffer.get_sample(SampleLocation::new(0, 10)), 1.0);
        assert_relative_eq!(original_buffer.get_sample(SampleLocation::new(1, 0)), 1.0);
    }

    #[test]
    fn duplicates_within_the_slice() {
        let mut original_buffer = OwnedAudioBuffer::new(20, 3, 44_100);

        let mut slice = MutableBorrowedAudioBuffer::slice_channels(&mut original_buffer, 1, 2);
        slice.fill_channel_with_value(0, 0.5);
        slice.duplicate_channel(SampleLocation::channel(0), 1, 20);

        assert!(original_buffer.channel_is_silent(0));
        assert_relative_eq!(original_buffer.get_sample(SampleLocation::new(2, 19)), 0.5);
    }
}
