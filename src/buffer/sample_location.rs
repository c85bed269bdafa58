/// The position of a sample within a buffer
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleLocation {
    /// The channel index
    pub channel: usize,

    /// The frame index
    pub frame: usize,
}

impl SampleLocation {
    /// Create a location from a channel and frame
    pub fn new(channel: usize, frame: usize) -> Self {
        Self { channel, frame }
    }

    /// The first sample in the buffer
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// The first frame of a channel
    pub fn channel(channel: usize) -> Self {
        Self::new(channel, 0)
    }

    /// A frame in the first channel
    pub fn frame(frame: usize) -> Self {
        Self::new(0, frame)
    }

    /// Move the location by a number of channels
    pub fn offset_channels(&self, channel_offset: usize) -> Self {
        Self::new(self.channel + channel_offset, self.frame)
    }

    /// Move the location by a number of frames
    pub fn offset_frames(&self, frame_offset: usize) -> Self {
        Self::new(self.channel, self.frame + frame_offset)
    }

    /// The same frame on a different channel
    pub fn with_channel(&self, channel: usize) -> Self {
        Self::new(channel, self.frame)
    }

    /// The same channel at a different frame
    pub fn with_frame(&self, frame: usize) -> Self {
        Self::new(self.channel, frame)
    }
}

/// A rectangular region of a buffer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SampleRange {
    /// The first channel in the range
    pub channel: usize,

    /// The first frame in the range
    pub frame: usize,

    /// The number of channels in the range
    pub channel_count: usize,

    /// The number of frames in the range
    pub frame_count: usize,
}

impl SampleRange {
    /// Create a range
    pub fn new(channel: usize, frame: usize, channel_count: usize, frame_count: usize) -> Self {
        Self {
            channel,
            frame,
            channel_count,
            frame_count,
        }
    }

    /// A range starting at the origin
    pub fn channel_and_frame_count(channel_count: usize, frame_count: usize) -> Self {
        Self::new(0, 0, channel_count, frame_count)
    }

    /// The location of the first sample in the range
    pub fn start(&self) -> SampleLocation {
        SampleLocation::new(self.channel, self.frame)
    }
}
