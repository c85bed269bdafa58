use super::sample_location::SampleRange;
use crate::{AudioBuffer, SampleLocation};

/// A read-only view of a portion of another buffer
pub struct BorrowedAudioBuffer<'a> {
    buffer: &'a dyn AudioBuffer,
    range: SampleRange,
}

impl<'a> BorrowedAudioBuffer<'a> {
    /// View a subset of frames
    pub fn slice_frames(
        buffer: &'a dyn AudioBuffer,
        frame_offset: usize,
        frame_count: usize,
    ) -> Self {
        let channel_count = buffer.channel_count();
        Self::slice(
            buffer,
            SampleRange::new(0, frame_offset, channel_count, frame_count),
        )
    }

    /// View a subset of channels
    pub fn slice_channels(
        buffer: &'a dyn AudioBuffer,
        channel_offset: usize,
        channel_count: usize,
    ) -> Self {
        let frame_count = buffer.frame_count();
        Self::slice(
            buffer,
            SampleRange::new(channel_offset, 0, channel_count, frame_count),
        )
    }

    /// View the first channels and frames
    pub fn slice_channels_and_frames(
        buffer: &'a dyn AudioBuffer,
        channel_count: usize,
        frame_count: usize,
    ) -> Self {
        Self::slice(
            buffer,
            SampleRange::channel_and_frame_count(channel_count, frame_count),
        )
    }

    /// View a range of another buffer
    pub fn slice(buffer: &'a dyn AudioBuffer, range: SampleRange) -> Self {
        assert!(buffer.range_is_valid(&range));
        Self { buffer, range }
    }
}

impl AudioBuffer for BorrowedAudioBuffer<'_> {
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

    fn get_channel_data_mut(&mut self, _: SampleLocation) -> &mut [f32] {
        panic!("Can't get mutable data from an immutable buffer")
    }

    fn duplicate_channel(&mut self, _: SampleLocation, _: usize, _: usize) {
        panic!("Can't modify an immutable buffer")
    }
}
