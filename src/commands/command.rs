use crate::graph::{Connection, Dsp, Endpoint};

use super::{CancelChangeRequest, Id, ParameterChangeRequest};

/// A request from the control side to the audio thread
pub enum Command {
    /// Start rendering and advancing time
    Start,
    /// Output silence and hold time
    Stop,

    /// Add a DSP to the graph
    AddDsp(Box<Dsp>),
    /// Remove a DSP and its connections
    RemoveDsp(Id),

    /// Connect the output of one DSP to the input of another
    AddConnection(Connection),
    /// Remove a connection between two DSPs
    RemoveConnection(Connection),

    /// Feed the process input into a DSP
    ConnectToInput(Endpoint),
    /// Route a DSP to the process output
    ConnectToOutput(Endpoint),

    /// Schedule a parameter change
    ParameterValueChange(ParameterChangeRequest),
    /// Cancel scheduled parameter changes
    CancelParameterChanges(CancelChangeRequest),
}
