use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};

/// Where a scheduled source is in its lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not started yet, and no start has been requested
    Unscheduled,

    /// A start has been requested but hasn't been reached
    Scheduled,

    /// Producing sound
    Playing,

    /// Stopped, and can't be started again
    Finished,
}

impl PlaybackState {
    fn as_u8(self) -> u8 {
        match self {
            PlaybackState::Unscheduled => 0,
            PlaybackState::Scheduled => 1,
            PlaybackState::Playing => 2,
            PlaybackState::Finished => 3,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => PlaybackState::Unscheduled,
            1 => PlaybackState::Scheduled,
            2 => PlaybackState::Playing,
            _ => PlaybackState::Finished,
        }
    }
}

/// A playback state shared between the control side and the audio thread
#[derive(Clone)]
pub struct SharedPlaybackState {
    state: Arc<AtomicU8>,
}

impl Default for SharedPlaybackState {
    fn default() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(PlaybackState::Unscheduled.as_u8())),
        }
    }
}

impl SharedPlaybackState {
    pub fn get(&self) -> PlaybackState {
        PlaybackState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn set(&self, state: PlaybackState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_state() {
        let state = SharedPlaybackState::default();
        assert_eq!(state.get(), PlaybackState::Unscheduled);

        let shared = state.clone();
        shared.set(PlaybackState::Scheduled);
        assert_eq!(state.get(), PlaybackState::Scheduled);

        state.set(PlaybackState::Finished);
        assert_eq!(shared.get(), PlaybackState::Finished);
    }
}
