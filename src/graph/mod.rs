mod assigned_buffer_pool;
mod connect_nodes;
mod connection;
mod dsp;
mod dsp_parameters;
mod endpoint;
mod graph_node;

pub use assigned_buffer_pool::AssignedBufferPool;
pub use connection::Connection;
pub use dsp::{Dsp, DspProcessor, ProcessContext};
pub use dsp_parameters::DspParameters;
pub use endpoint::{Endpoint, EndpointType};
pub use graph_node::GraphNode;
