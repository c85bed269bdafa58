use std::{
    fmt,
    ops::{Add, Sub},
    time::Duration,
};

type FixedPoint = fixed::types::I32F32;

const SAMPLE_INDEX_TOLERANCE: f64 = 1e-6;

/// A fixed-point representation of a time in seconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timestamp {
    seconds: FixedPoint,
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.seconds.cmp(&other.seconds)
    }
}

impl Sub for Timestamp {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            seconds: self.seconds.saturating_sub(rhs.seconds),
        }
    }
}

impl Add for Timestamp {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            seconds: self.seconds.saturating_add(rhs.seconds),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.as_seconds())
    }
}

impl Timestamp {
    /// Zero seconds
    pub fn zero() -> Self {
        Self {
            seconds: FixedPoint::ZERO,
        }
    }

    pub(crate) fn from_raw_i64(raw_value: i64) -> Self {
        Self {
            seconds: FixedPoint::from_bits(raw_value),
        }
    }

    pub(crate) fn as_raw_i64(&self) -> i64 {
        self.seconds.to_bits()
    }

    /// Create a timestamp from a number of seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self {
            seconds: FixedPoint::saturating_from_num(seconds),
        }
    }

    /// Create a timestamp from a number of samples at a sample rate
    pub fn from_samples(samples: f64, sample_rate: usize) -> Self {
        debug_assert!(sample_rate > 0);
        Self::from_seconds(samples / sample_rate as f64)
    }

    /// Create a timestamp from a duration
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_seconds(duration.as_secs_f64())
    }

    /// Create a timestamp from a number of beats
    pub fn from_beats(beats: f64, tempo: f64) -> Self {
        debug_assert!(tempo > 0.0);

        let beat_frequency = tempo / 60.0;
        Self::from_seconds(beats / beat_frequency)
    }

    /// Get the number of seconds
    pub fn as_seconds(&self) -> f64 {
        self.seconds.to_num()
    }

    /// Get the number of samples at a sample rate
    pub fn as_samples(&self, sample_rate: usize) -> f64 {
        self.seconds.to_num::<f64>() * sample_rate as f64
    }

    /// The index of the first sample at or after this time
    ///
    /// Times within a millionth of a sample of an index land on that index.
    pub fn as_sample_index(&self, sample_rate: usize) -> usize {
        let samples = self.as_samples(sample_rate);
        (samples - SAMPLE_INDEX_TOLERANCE).ceil().max(0.0) as usize
    }

    /// Get the number of beats at a tempo
    pub fn as_beats(&self, tempo: f64) -> f64 {
        let beat_frequency = tempo / 60.0;
        self.seconds.to_num::<f64>() * beat_frequency
    }

    /// Convert to a duration, clamping negative times to zero
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs_f64(self.as_seconds().max(0.0))
    }

    /// Increment by a number of samples
    pub fn incremented_by_samples(&self, sample_count: usize, sample_rate: usize) -> Self {
        *self + Self::from_samples(sample_count as f64, sample_rate)
    }

    /// Increment by a number of seconds
    pub fn incremented_by_seconds(&self, seconds: f64) -> Self {
        *self + Self::from_seconds(seconds)
    }

    /// Increment by a number of beats
    pub fn incremented_by_beats(&self, beats: f64, tempo: f64) -> Self {
        *self + Self::from_beats(beats, tempo)
    }
}
