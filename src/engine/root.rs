use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use crate::{
    commands::Command, realtime::Processor, AudioProcess, CommandQueue, Context, Destination,
    EngineOptions, Timestamp,
};

use super::context::NotifierStatus;

pub struct Root {
    options: EngineOptions,
    running: bool,
    timestamp: Arc<AtomicI64>,
    command_transmitter: CommandTransmitter,
    notifiers: Vec<Box<dyn FnMut() -> NotifierStatus>>,
    destination: Destination,
}

impl Context for Root {
    fn start(&mut self) {
        log::debug!("Starting context");
        self.running = true;
        self.command_transmitter.send(Command::Start);
    }

    fn stop(&mut self) {
        log::debug!("Stopping context at {}", self.current_time());
        self.running = false;
        self.command_transmitter.send(Command::Stop);
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn current_time(&self) -> Timestamp {
        Timestamp::from_raw_i64(self.timestamp.load(Ordering::Acquire))
    }

    fn sample_rate(&self) -> usize {
        self.options.sample_rate()
    }

    fn maximum_frame_count(&self) -> usize {
        self.options.maximum_frame_count()
    }

    fn channel_count(&self) -> usize {
        self.options.channel_count()
    }

    fn get_command_queue(&self) -> Box<dyn CommandQueue> {
        Box::new(self.command_transmitter.clone())
    }

    fn destination(&self) -> &Destination {
        &self.destination
    }

    fn add_notifier(&mut self, notifier: Box<dyn FnMut() -> NotifierStatus>) {
        self.notifiers.push(notifier);
    }

    fn process_notifications(&mut self) {
        self.notifiers
            .retain_mut(|notifier| (notifier)() == NotifierStatus::Continue);
    }
}

/// Create an audio context with the default options at a sample rate
///
/// See `create_engine_with_options`.
pub fn create_engine(sample_rate: usize) -> (Box<dyn Context>, Box<dyn AudioProcess + Send>) {
    create_engine_with_options(EngineOptions::default().with_sample_rate(sample_rate))
}

/// Create an audio context
///
/// This returns a pair:
///
/// * The `Context` is the root context. This will be required to create most
///   nodes and should be kept in scope for the lifetime of the application
///
/// * The `AudioProcess` is used to generate audio. This might be passed to a
///   different thread if used in a realtime context, or it might be kept in
///   the main thread if used offline.
pub fn create_engine_with_options(
    options: EngineOptions,
) -> (Box<dyn Context>, Box<dyn AudioProcess + Send>) {
    log::debug!(
        "Creating engine: {} Hz, {} channels, {} frames per block",
        options.sample_rate(),
        options.channel_count(),
        options.maximum_frame_count()
    );

    let (command_transmitter, command_receiver) = CommandTransmitter::new();
    let timestamp = Arc::new(AtomicI64::new(0));

    let processor = Box::new(Processor::new(
        options.sample_rate(),
        options.maximum_frame_count(),
        options.maximum_channel_count(),
        command_receiver,
        Arc::clone(&timestamp),
    ));

    let destination = Destination::with_command_queue(
        Box::new(command_transmitter.clone()),
        options.channel_count(),
    );

    let root = Box::new(Root {
        options,
        running: false,
        timestamp,
        command_transmitter,
        notifiers: Vec::new(),
        destination,
    });

    (root, processor)
}

#[derive(Clone)]
struct CommandTransmitter {
    command_tx: crossbeam::channel::Sender<Command>,
}

impl CommandTransmitter {
    fn new() -> (Self, crossbeam::channel::Receiver<Command>) {
        let (command_tx, command_rx) = crossbeam::channel::unbounded();
        (Self { command_tx }, command_rx)
    }
}

impl CommandQueue for CommandTransmitter {
    fn send(&self, command: Command) {
        let _ = self.command_tx.send(command);
    }
}
