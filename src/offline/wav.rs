use std::path::Path;

use crate::{AudioBuffer, Error, OwnedAudioBuffer, Result, SampleLocation};

/// How [`write_wav`] encodes a buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WavOptions {
    /// Bits per sample, 16 or 24
    pub bits_per_sample: u16,

    /// Sample rate of the file, or `None` to use the buffer's sample rate
    pub sample_rate: Option<usize>,
}

impl Default for WavOptions {
    fn default() -> Self {
        Self {
            bits_per_sample: 24,
            sample_rate: None,
        }
    }
}

/// Write a buffer to a PCM WAV file
///
/// Samples are clipped to [-1, 1].
pub fn write_wav(
    buffer: &dyn AudioBuffer,
    path: impl AsRef<Path>,
    options: WavOptions,
) -> Result<()> {
    if !matches!(options.bits_per_sample, 16 | 24) {
        return Err(Error::UnsupportedConfig);
    }

    let resampled;
    let buffer = match options.sample_rate {
        Some(sample_rate) if sample_rate != buffer.sample_rate() => {
            resampled = OwnedAudioBuffer::from_buffer(buffer).resampled(sample_rate);
            &resampled as &dyn AudioBuffer
        }
        _ => buffer,
    };

    let specification = hound::WavSpec {
        channels: buffer.channel_count() as u16,
        sample_rate: buffer.sample_rate() as u32,
        bits_per_sample: options.bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    };

    let max_value = (1_i32 << (options.bits_per_sample - 1)) - 1;

    let mut writer = hound::WavWriter::create(path.as_ref(), specification)?;

    for frame in 0..buffer.frame_count() {
        for channel in 0..buffer.channel_count() {
            let sample = buffer
                .get_sample(SampleLocation::new(channel, frame))
                .clamp(-1.0, 1.0);

            writer.write_sample((sample * max_value as f32) as i32)?;
        }
    }

    writer.finalize()?;

    log::debug!(
        "Wrote {} frames to {}",
        buffer.frame_count(),
        path.as_ref().display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_samples(path: &Path) -> (hound::WavSpec, Vec<i32>) {
        let mut reader = hound::WavReader::open(path).unwrap();
        let spec = reader.spec();
        let samples = reader.samples::<i32>().map(|sample| sample.unwrap()).collect();
        (spec, samples)
    }

    #[test]
    fn writes_interleaved_pcm() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("out.wav");

        let mut buffer = OwnedAudioBuffer::new(2, 2, 44_100);
        buffer.set_sample(SampleLocation::new(0, 0), 1.0);
        buffer.set_sample(SampleLocation::new(1, 0), -1.0);
        buffer.set_sample(SampleLocation::new(0, 1), 2.0);

        write_wav(
            &buffer,
            &path,
            WavOptions {
                bits_per_sample: 16,
                sample_rate: None,
            },
        )
        .unwrap();

        let (spec, samples) = read_samples(&path);
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(samples, vec![32_767, -32_767, 32_767, 0]);
    }

    #[test]
    fn resamples_before_writing() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("out.wav");

        let buffer = OwnedAudioBuffer::new(48_000, 1, 48_000);

        write_wav(
            &buffer,
            &path,
            WavOptions {
                bits_per_sample: 24,
                sample_rate: Some(24_000),
            },
        )
        .unwrap();

        let (spec, samples) = read_samples(&path);
        assert_eq!(spec.sample_rate, 24_000);
        assert_eq!(samples.len(), 24_000);
    }

    #[test]
    fn rejects_unsupported_bit_depths() {
        let directory = tempfile::tempdir().unwrap();
        let buffer = OwnedAudioBuffer::new(1, 1, 44_100);

        let result = write_wav(
            &buffer,
            directory.path().join("out.wav"),
            WavOptions {
                bits_per_sample: 12,
                sample_rate: None,
            },
        );

        assert!(matches!(result, Err(Error::UnsupportedConfig)));
    }
}
