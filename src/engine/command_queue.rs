use crate::commands::Command;

/// Sends commands to the audio process
pub trait CommandQueue {
    /// Send a command
    ///
    /// Commands are applied at the start of the next processed block.
    fn send(&self, command: Command);
}
