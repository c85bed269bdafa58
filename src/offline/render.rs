use std::time::Duration;

use crate::{AudioProcess, BorrowedAudioBuffer, MutableBorrowedAudioBuffer, OwnedAudioBuffer};

const RENDER_BLOCK_SIZE: usize = 1024;

/// Render an audio process into a buffer without a device
///
/// The process receives silent input and is driven block by block until
/// `duration` has been rendered.
pub fn render_offline(
    audio_process: &mut dyn AudioProcess,
    duration: Duration,
    channel_count: usize,
    sample_rate: usize,
) -> OwnedAudioBuffer {
    let total_frame_count = (duration.as_secs_f64() * sample_rate as f64).round() as usize;

    let mut output_buffer = OwnedAudioBuffer::new(total_frame_count, channel_count, sample_rate);
    let input_buffer = OwnedAudioBuffer::new(RENDER_BLOCK_SIZE, channel_count, sample_rate);

    let mut position = 0;

    while position < total_frame_count {
        let frame_count = RENDER_BLOCK_SIZE.min(total_frame_count - position);

        let input = BorrowedAudioBuffer::slice_frames(&input_buffer, 0, frame_count);
        let mut output =
            MutableBorrowedAudioBuffer::slice_frames(&mut output_buffer, position, frame_count);

        audio_process.process(&input, &mut output);

        position += frame_count;
    }

    output_buffer
}
