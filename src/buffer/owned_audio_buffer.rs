use crate::{AudioBuffer, SampleLocation};
use rand::Rng;

/// An audio buffer that owns its samples
#[repr(align(64))]
#[derive(Clone, Debug)]
pub struct OwnedAudioBuffer {
    data: Vec<f32>,
    channel_count: usize,
    frame_count: usize,
    sample_rate: usize,
}

impl OwnedAudioBuffer {
    /// Create a silent buffer
    pub fn new(frame_count: usize, channel_count: usize, sample_rate: usize) -> Self {
        Self {
            data: vec![0.0; frame_count * channel_count],
            channel_count,
            frame_count,
            sample_rate,
        }
    }

    /// Create a buffer holding a copy of another buffer
    pub fn from_buffer(buffer: &dyn AudioBuffer) -> Self {
        let mut new_buffer = Self::new(
            buffer.frame_count(),
            buffer.channel_count(),
            buffer.sample_rate(),
        );

        new_buffer.copy_from(
            buffer,
            SampleLocation::origin(),
            SampleLocation::origin(),
            buffer.channel_count(),
            buffer.frame_count(),
        );

        new_buffer
    }

    /// Create a buffer holding a copy of this one at a different sample rate
    pub fn resampled(&self, sample_rate: usize) -> Self {
        assert!(sample_rate > 0);

        if sample_rate == self.sample_rate {
            return self.clone();
        }

        let frame_count = (self.frame_count as f64 * sample_rate as f64 / self.sample_rate as f64)
            .ceil() as usize;

        let mut buffer = Self::new(frame_count, self.channel_count, sample_rate);

        for channel in 0..self.channel_count {
            let location = SampleLocation::channel(channel);
            buffer.sample_rate_convert_from(self, location, location);
        }

        buffer
    }

    /// Create a buffer of uniformly distributed noise between -1 and 1
    pub fn white_noise(frame_count: usize, channel_count: usize, sample_rate: usize) -> Self {
        let mut buffer = Self::new(frame_count, channel_count, sample_rate);

        let mut random_generator = rand::rng();

        buffer
            .data
            .iter_mut()
            .for_each(|sample| *sample = random_generator.random_range(-1.0..=1.0));

        buffer
    }

    /// Create a buffer holding a sine wave, identical in every channel
    pub fn sine(
        frame_count: usize,
        channel_count: usize,
        sample_rate: usize,
        frequency: f64,
        amplitude: f64,
    ) -> Self {
        debug_assert!(channel_count > 0);

        let mut buffer = Self::new(frame_count, channel_count, sample_rate);

        let channel = buffer.get_channel_data_mut(SampleLocation::origin());

        for (index, sample) in channel.iter_mut().enumerate() {
            let time = index as f64 / sample_rate as f64;
            *sample = (amplitude * (std::f64::consts::TAU * frequency * time).sin()) as f32;
        }

        for channel in 1..channel_count {
            buffer.duplicate_channel(SampleLocation::channel(0), channel, frame_count);
        }

        buffer
    }

    fn get_sample_location_bounds(&self, sample_location: &SampleLocation) -> (usize, usize) {
        debug_assert!(sample_location.channel < self.channel_count);
        debug_assert!(sample_location.frame <= self.frame_count);

        let start = sample_location.channel * self.frame_count + sample_location.frame;
        let end = (sample_location.channel + 1) * self.frame_count;
        (start, end)
    }
}

impl AudioBuffer for OwnedAudioBuffer {
    fn channel_count(&self) -> usize {
        self.channel_count
    }

    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn sample_rate(&self) -> usize {
        self.sample_rate
    }

    fn get_channel_data(&self, sample_location: SampleLocation) -> &[f32] {
        let (start, end) = self.get_sample_location_bounds(&sample_location);
        &self.data[start..end]
    }

    fn get_channel_data_mut(&mut self, sample_location: SampleLocation) -> &mut [f32] {
        let (start, end) = self.get_sample_location_bounds(&sample_location);
        &mut self.data[start..end]
    }

    fn duplicate_channel(&mut self, source: SampleLocation, to_channel: usize, frame_count: usize) {
        if source.channel == to_channel {
            return;
        }

        let (source_start, _) = self.get_sample_location_bounds(&source);
        let (destination_start, _) =
            self.get_sample_location_bounds(&source.with_channel(to_channel));

        self.data
            .copy_within(source_start..source_start + frame_count, destination_start);
    }
}
