mod dsp_graph;
mod edge;
mod garbage_collector;
mod graph;
mod node;
mod processor;
mod topological_sort;

pub use processor::Processor;
