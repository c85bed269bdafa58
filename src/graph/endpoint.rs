use crate::commands::Id;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndpointType {
    Input,
    Output,
}

/// The input or output of a node in the graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub dsp_id: Id,
    pub endpoint_type: EndpointType,
}

impl Endpoint {
    pub fn new(dsp_id: Id, endpoint_type: EndpointType) -> Self {
        Self {
            dsp_id,
            endpoint_type,
        }
    }
}
