use crate::{AudioBuffer, OwnedAudioBuffer};

/// Preallocated buffers handed out on the audio thread
pub struct BufferPool {
    free_buffers: Vec<OwnedAudioBuffer>,
}

impl BufferPool {
    pub fn new(
        buffer_count: usize,
        frame_count: usize,
        channel_count: usize,
        sample_rate: usize,
    ) -> Self {
        Self {
            free_buffers: (0..buffer_count)
                .map(|_| OwnedAudioBuffer::new(frame_count, channel_count, sample_rate))
                .collect(),
        }
    }

    pub fn remove(&mut self) -> Option<OwnedAudioBuffer> {
        self.free_buffers.pop()
    }

    pub fn add(&mut self, mut buffer: OwnedAudioBuffer) {
        buffer.clear();
        self.free_buffers.push(buffer);
    }

    #[cfg(test)]
    pub fn available(&self) -> usize {
        self.free_buffers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returned_buffers_are_cleared() {
        let mut pool = BufferPool::new(1, 64, 2, 44_100);

        let mut buffer = pool.remove().expect("pool should have a buffer");
        assert!(pool.remove().is_none());

        buffer.fill_with_value(1.0);
        pool.add(buffer);

        assert_eq!(pool.available(), 1);
        let buffer = pool.remove().expect("buffer should be returned");
        assert!(buffer.is_silent());
    }
}
