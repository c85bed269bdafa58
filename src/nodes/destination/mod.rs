mod destination_node;
mod destination_processor;

pub use destination_node::Destination;
