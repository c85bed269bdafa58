use crate::{
    commands::Id,
    graph::{DspParameters, GraphNode},
    parameter::{AudioParameter, ParameterRange},
    Context,
};

use super::gain_processor::GainProcessor;

/// A node that changes the level of its input
pub struct Gain {
    /// The node in the graph
    pub node: GraphNode,
    gain: AudioParameter,
}

const DEFAULT_GAIN: f64 = 1.0;

impl Gain {
    /// Create a gain node
    pub fn new(context: &dyn Context, channel_count: usize) -> Self {
        let id = Id::generate();

        let (gain, realtime_gain) = AudioParameter::new(
            id,
            "gain",
            ParameterRange::unbounded(DEFAULT_GAIN),
            context,
        );

        Self {
            node: GraphNode::new(
                id,
                context,
                channel_count,
                channel_count,
                Box::new(GainProcessor),
                DspParameters::new([realtime_gain]),
            ),
            gain,
        }
    }

    /// The linear gain applied to every channel
    pub fn gain(&mut self) -> &mut AudioParameter {
        &mut self.gain
    }
}
