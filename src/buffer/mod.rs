mod audio_buffer;
mod borrowed_audio_buffer;
mod buffer_pool;
mod mutable_borrowed_audio_buffer;
mod owned_audio_buffer;
mod sample_location;

pub use audio_buffer::AudioBuffer;
pub use audio_buffer::FrameIterator;
pub use borrowed_audio_buffer::BorrowedAudioBuffer;
pub(crate) use buffer_pool::BufferPool;
pub use mutable_borrowed_audio_buffer::MutableBorrowedAudioBuffer;
pub use owned_audio_buffer::OwnedAudioBuffer;
pub use sample_location::SampleLocation;
pub use sample_location::SampleRange;
