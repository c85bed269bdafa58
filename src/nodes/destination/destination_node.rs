use crate::{
    commands::Id,
    graph::{DspParameters, GraphNode},
    CommandQueue, Context,
};

use super::destination_processor::DestinationProcessor;

/// The node whose output is the output of the audio process
///
/// Every connection made to the destination is mixed into its input. A
/// context creates one when it's created, available from
/// `Context::destination`.
pub struct Destination {
    /// The node in the graph
    pub node: GraphNode,
    channel_count: usize,
}

impl Destination {
    /// Create a destination and route it to the output
    ///
    /// The output of any previous destination is no longer used.
    pub fn new(context: &dyn Context, channel_count: usize) -> Self {
        Self::with_command_queue(context.get_command_queue(), channel_count)
    }

    pub(crate) fn with_command_queue(
        command_queue: Box<dyn CommandQueue>,
        channel_count: usize,
    ) -> Self {
        debug_assert!(channel_count > 0);

        let id = Id::generate();

        let node = GraphNode::with_command_queue(
            id,
            command_queue,
            channel_count,
            channel_count,
            Box::new(DestinationProcessor),
            DspParameters::empty(),
        );

        node.connect_to_output();

        log::debug!("Created destination {} with {channel_count} channels", id.as_u64());

        Self {
            node,
            channel_count,
        }
    }

    /// The number of channels the destination renders
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }
}
