const DEFAULT_SAMPLE_RATE: usize = 44_100;
const DEFAULT_MAXIMUM_FRAME_COUNT: usize = 512;
const DEFAULT_MAXIMUM_CHANNEL_COUNT: usize = 2;

/// Options for creating an engine
///
/// ```
/// let options = EngineOptions::default()
///     .with_sample_rate(48_000)
///     .with_maximum_frame_count(256);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    sample_rate: usize,
    maximum_frame_count: usize,
    maximum_channel_count: usize,
    channel_count: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            maximum_frame_count: DEFAULT_MAXIMUM_FRAME_COUNT,
            maximum_channel_count: DEFAULT_MAXIMUM_CHANNEL_COUNT,
            channel_count: DEFAULT_MAXIMUM_CHANNEL_COUNT,
        }
    }
}

impl EngineOptions {
    /// Set the sample rate
    pub fn with_sample_rate(mut self, sample_rate: usize) -> Self {
        assert!(sample_rate > 0);
        self.sample_rate = sample_rate;
        self
    }

    /// Set the largest block that will be rendered at once
    ///
    /// Larger buffers passed to the audio process are rendered in chunks.
    pub fn with_maximum_frame_count(mut self, maximum_frame_count: usize) -> Self {
        assert!(maximum_frame_count > 0);
        self.maximum_frame_count = maximum_frame_count;
        self
    }

    /// Set the most channels any node can process
    pub fn with_maximum_channel_count(mut self, maximum_channel_count: usize) -> Self {
        assert!(maximum_channel_count > 0);
        self.maximum_channel_count = maximum_channel_count;
        self.channel_count = self.channel_count.min(maximum_channel_count);
        self
    }

    /// Set the number of channels the destination renders
    pub fn with_channel_count(mut self, channel_count: usize) -> Self {
        assert!(channel_count > 0);
        self.channel_count = channel_count;
        self.maximum_channel_count = self.maximum_channel_count.max(channel_count);
        self
    }

    /// The sample rate
    pub fn sample_rate(&self) -> usize {
        self.sample_rate
    }

    /// The largest block that will be rendered at once
    pub fn maximum_frame_count(&self) -> usize {
        self.maximum_frame_count
    }

    /// The most channels any node can process
    pub fn maximum_channel_count(&self) -> usize {
        self.maximum_channel_count
    }

    /// The number of channels the destination renders
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }
}
