use crate::{CommandQueue, Destination, Timestamp};

/// Returned by a notifier to say whether it wants to be called again
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifierStatus {
    /// Keep calling the notifier
    Continue,

    /// Remove the notifier
    Remove,
}

/// The root audio context
pub trait Context {
    /// Start the audio context
    ///
    /// Before this is called, the audio process outputs silence and time will
    /// not advance
    fn start(&mut self);

    /// Stop the audio context
    ///
    /// Time stops advancing and the audio process outputs silence.
    fn stop(&mut self);

    /// Whether `start` has been called more recently than `stop`
    fn is_running(&self) -> bool;

    /// Get the current time in the audio context
    ///
    /// If running the audio process in a different thread, the time may advance
    /// between asking for the time and getting the time. If this is the case,
    /// some 'lookahead' may be required.
    fn current_time(&self) -> Timestamp;

    /// Get the sample rate of the audio context
    fn sample_rate(&self) -> usize;

    /// The largest block the audio process renders at once
    fn maximum_frame_count(&self) -> usize;

    /// The number of channels the destination renders
    fn channel_count(&self) -> usize;

    /// Get the command queue to send commands to the context
    fn get_command_queue(&self) -> Box<dyn CommandQueue>;

    /// The node whose output is the output of the audio process
    fn destination(&self) -> &Destination;

    /// Add a notifier that will be given an opportunity to get notifications
    /// whenever `process_notifications` is called
    fn add_notifier(&mut self, notifier: Box<dyn FnMut() -> NotifierStatus>);

    /// Call every notifier, removing those that are finished
    fn process_notifications(&mut self);
}
