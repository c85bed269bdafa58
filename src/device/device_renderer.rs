use crossbeam::channel::Receiver;

use crate::{
    AudioBuffer, AudioProcess, BorrowedAudioBuffer, MutableBorrowedAudioBuffer, OwnedAudioBuffer,
    SampleLocation,
};

/// Drives an [`AudioProcess`] from an interleaved device callback
///
/// Callback buffers are rendered in chunks no larger than the preallocated
/// planar buffers, so rendering never allocates. Captured input arrives as
/// interleaved samples over a channel. It is read a whole frame at a time, and
/// frames that haven't fully arrived are treated as silence.
pub struct DeviceRenderer {
    audio_process: Box<dyn AudioProcess + Send>,
    input_buffer: OwnedAudioBuffer,
    output_buffer: OwnedAudioBuffer,
    input_channel_count: usize,
    input_receiver: Option<Receiver<f32>>,
}

impl DeviceRenderer {
    /// Create a renderer
    ///
    /// `input_channel_count` is the interleaved width of the captured samples.
    /// With no input receiver the process receives silence as wide as the
    /// output.
    pub fn new(
        audio_process: Box<dyn AudioProcess + Send>,
        maximum_frame_count: usize,
        output_channel_count: usize,
        sample_rate: usize,
        input: Option<(Receiver<f32>, usize)>,
    ) -> Self {
        assert!(maximum_frame_count > 0);
        assert!(output_channel_count > 0);

        let (input_receiver, input_channel_count) = match input {
            Some((receiver, channel_count)) if channel_count > 0 => {
                (Some(receiver), channel_count)
            }
            _ => (None, output_channel_count),
        };

        Self {
            audio_process,
            input_buffer: OwnedAudioBuffer::new(
                maximum_frame_count,
                input_channel_count,
                sample_rate,
            ),
            output_buffer: OwnedAudioBuffer::new(
                maximum_frame_count,
                output_channel_count,
                sample_rate,
            ),
            input_channel_count,
            input_receiver,
        }
    }

    /// Number of channels written to each interleaved frame
    pub fn output_channel_count(&self) -> usize {
        self.output_buffer.channel_count()
    }

    /// Render into an interleaved device buffer
    pub fn render(&mut self, interleaved_output: &mut [f32]) {
        let channel_count = self.output_buffer.channel_count();
        let total_frame_count = interleaved_output.len() / channel_count;
        let maximum_frame_count = self.output_buffer.frame_count();

        let mut frame_offset = 0;

        while frame_offset < total_frame_count {
            let frame_count = maximum_frame_count.min(total_frame_count - frame_offset);

            self.receive_input(frame_count);

            let input = BorrowedAudioBuffer::slice_frames(&self.input_buffer, 0, frame_count);
            let mut output =
                MutableBorrowedAudioBuffer::slice_frames(&mut self.output_buffer, 0, frame_count);

            output.clear();
            self.audio_process.process(&input, &mut output);

            let start = frame_offset * channel_count;
            let end = start + frame_count * channel_count;
            output.copy_to_interleaved(
                &mut interleaved_output[start..end],
                channel_count,
                frame_count,
            );

            frame_offset += frame_count;
        }

        interleaved_output[total_frame_count * channel_count..].fill(0.0);
    }

    fn receive_input(&mut self, frame_count: usize) {
        let Some(receiver) = &self.input_receiver else {
            return;
        };

        for frame in 0..frame_count {
            let frame_available = receiver.len() >= self.input_channel_count;

            for channel in 0..self.input_channel_count {
                let sample = if frame_available {
                    receiver.try_recv().unwrap_or(0.0)
                } else {
                    0.0
                };

                self.input_buffer
                    .set_sample(SampleLocation::new(channel, frame), sample);
            }
        }
    }
}
