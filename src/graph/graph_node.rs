use crate::{commands::Id, Command, CommandQueue, Context};

use super::{
    connection::Connection,
    endpoint::{Endpoint, EndpointType},
    Dsp, DspParameters, DspProcessor,
};

/// A node's handle to its DSP in the audio process
///
/// The DSP is added to the audio process when the node is created and removed
/// when the node is dropped.
pub struct GraphNode {
    id: Id,
    command_queue: Box<dyn CommandQueue>,
}

impl GraphNode {
    /// Add a DSP to the context's audio process
    pub(crate) fn new(
        id: Id,
        context: &dyn Context,
        input_count: usize,
        output_count: usize,
        processor: Box<dyn DspProcessor + Send + Sync>,
        parameters: DspParameters,
    ) -> Self {
        Self::with_command_queue(
            id,
            context.get_command_queue(),
            input_count,
            output_count,
            processor,
            parameters,
        )
    }

    /// Add a DSP to the audio process that reads `command_queue`
    pub(crate) fn with_command_queue(
        id: Id,
        command_queue: Box<dyn CommandQueue>,
        input_count: usize,
        output_count: usize,
        processor: Box<dyn DspProcessor + Send + Sync>,
        parameters: DspParameters,
    ) -> Self {
        let dsp = Dsp::new(id, input_count, output_count, processor, parameters);
        command_queue.send(Command::AddDsp(Box::new(dsp)));

        Self { id, command_queue }
    }

    /// The identifier of the node's DSP
    pub fn id(&self) -> Id {
        self.id
    }

    /// Feed the input of the audio process into this node
    pub fn connect_to_input(&self) {
        self.command_queue
            .send(Command::ConnectToInput(Endpoint::new(
                self.id,
                EndpointType::Input,
            )));
    }

    /// Route this node to the output of the audio process
    pub fn connect_to_output(&self) {
        self.command_queue
            .send(Command::ConnectToOutput(Endpoint::new(
                self.id,
                EndpointType::Output,
            )));
    }

    /// Connect the output of this node to the input of another
    ///
    /// A connection that would create a cycle is ignored.
    pub fn connect_to(&self, node: &GraphNode) {
        self.command_queue
            .send(Command::AddConnection(Connection::new(self.id, node.id)));
    }

    /// Remove a connection made with `connect_to`
    pub fn disconnect_from(&self, node: &GraphNode) {
        self.command_queue
            .send(Command::RemoveConnection(Connection::new(self.id, node.id)));
    }
}

impl Drop for GraphNode {
    fn drop(&mut self) {
        self.command_queue.send(Command::RemoveDsp(self.id));
    }
}
