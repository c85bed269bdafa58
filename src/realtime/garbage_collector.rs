use std::thread;

use crossbeam::channel::{Receiver, Sender};

use crate::graph::Dsp;

pub enum GarbageCollectionCommand {
    DisposeDsp(Box<Dsp>),
}

pub type GarbageCollectionSender = Sender<GarbageCollectionCommand>;

/// Drop removed DSPs on their own thread
///
/// The thread exits once every sender has been dropped.
pub fn run_garbage_collector(receive_channel: Receiver<GarbageCollectionCommand>) {
    let spawned = thread::Builder::new()
        .name(String::from("tonegraph-gc"))
        .spawn(move || {
            for command in receive_channel.iter() {
                handle_garbage_collection_event(command);
            }

            log::debug!("Garbage collector finished");
        });

    if let Err(error) = spawned {
        log::warn!("Couldn't start the garbage collector: {error}");
    }
}

fn handle_garbage_collection_event(command: GarbageCollectionCommand) {
    match command {
        GarbageCollectionCommand::DisposeDsp(dsp) => {
            log::debug!("Disposing DSP {}", dsp.get_id().as_u64());
        }
    }
}
