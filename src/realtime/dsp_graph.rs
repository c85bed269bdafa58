use crate::{
    buffer::{BufferPool, MutableBorrowedAudioBuffer},
    commands::{CancelChangeRequest, Id, ParameterChangeRequest},
    graph::{AssignedBufferPool, Connection, Dsp, Endpoint, EndpointType},
    AudioBuffer, BorrowedAudioBuffer, SampleLocation, Timestamp,
};

use super::{
    garbage_collector::{run_garbage_collector, GarbageCollectionCommand, GarbageCollectionSender},
    graph::{Direction, Graph},
    topological_sort::TopologicalSort,
};

/// The graph of DSPs rendered by the audio process
pub struct DspGraph {
    graph: Graph<Box<Dsp>, Connection>,
    topological_sort: TopologicalSort,
    input_endpoint: Option<Endpoint>,
    output_endpoints: Vec<Endpoint>,
    garbage_collection_tx: GarbageCollectionSender,
    graph_needs_sort: bool,
    free_buffer_pool: BufferPool,
    assigned_buffer_pool: AssignedBufferPool<Endpoint>,
    maximum_channel_count: usize,
    maximum_frame_count: usize,
}

const MAXIMUM_BUFFER_COUNT: usize = 1024;
const MAXIMUM_GRAPH_NODE_COUNT: usize = 512;
const MAXIMUM_GRAPH_EDGE_COUNT: usize = 512;
const GARBAGE_COLLECTION_CHANNEL_CAPACITY: usize = 512;

impl DspGraph {
    pub fn new(
        maximum_frame_count: usize,
        maximum_channel_count: usize,
        sample_rate: usize,
    ) -> Self {
        let (garbage_collection_tx, garbage_collection_rx) =
            crossbeam::channel::bounded(GARBAGE_COLLECTION_CHANNEL_CAPACITY);
        run_garbage_collector(garbage_collection_rx);

        Self {
            graph: Graph::with_capacity(MAXIMUM_GRAPH_NODE_COUNT, MAXIMUM_GRAPH_EDGE_COUNT),
            topological_sort: TopologicalSort::with_capacity(MAXIMUM_GRAPH_NODE_COUNT),
            graph_needs_sort: false,
            input_endpoint: None,
            output_endpoints: Vec::with_capacity(MAXIMUM_GRAPH_NODE_COUNT),
            garbage_collection_tx,
            free_buffer_pool: BufferPool::new(
                MAXIMUM_BUFFER_COUNT,
                maximum_frame_count,
                maximum_channel_count,
                sample_rate,
            ),
            assigned_buffer_pool: AssignedBufferPool::with_capacity(MAXIMUM_BUFFER_COUNT),
            maximum_channel_count,
            maximum_frame_count,
        }
    }

    /// Render one block
    ///
    /// At most `maximum_frame_count` frames are rendered. Output channels the
    /// graph doesn't write are silent.
    pub fn process(
        &mut self,
        input_buffer: &dyn AudioBuffer,
        output_buffer: &mut dyn AudioBuffer,
        start_time: &Timestamp,
    ) {
        let frame_count = std::cmp::min(output_buffer.frame_count(), self.maximum_frame_count);

        self.sort_graph();

        if let Some(input_endpoint) = self.input_endpoint {
            if let Some(mut buffer) = self.free_buffer_pool.remove() {
                buffer.copy_from(
                    input_buffer,
                    SampleLocation::origin(),
                    SampleLocation::origin(),
                    std::cmp::min(input_buffer.channel_count(), self.maximum_channel_count),
                    std::cmp::min(input_buffer.frame_count(), frame_count),
                );

                self.assigned_buffer_pool.add(buffer, &input_endpoint);
            }
        }

        process_dsps(
            self.topological_sort.get_sorted_graph(),
            &mut self.free_buffer_pool,
            &mut self.assigned_buffer_pool,
            &mut self.graph,
            frame_count,
            self.maximum_channel_count,
            start_time,
        );

        output_buffer.clear();

        if let Some(output_endpoint) = self.output_endpoints.last().copied() {
            let source_channel_count = self
                .graph
                .get_node(output_endpoint.dsp_id)
                .map_or(0, |dsp| dsp.output_count())
                .min(self.maximum_channel_count);

            if let Some(buffer) = self.assigned_buffer_pool.get(&output_endpoint) {
                let destination_channel_count = output_buffer.channel_count();

                mix_channels(
                    buffer,
                    source_channel_count,
                    output_buffer,
                    destination_channel_count,
                    frame_count,
                );
            }
        }

        while let Some((_, buffer)) = self.assigned_buffer_pool.remove_next() {
            self.free_buffer_pool.add(buffer);
        }
    }

    pub fn add_dsp(&mut self, dsp: Box<Dsp>) {
        let id = dsp.get_id();

        if self.graph.contains_node(id) {
            return;
        }

        self.graph.add_node_with_id(id, dsp);
        self.mark_graph_needs_sort();
    }

    fn mark_graph_needs_sort(&mut self) {
        self.graph_needs_sort = true;
    }

    fn sort_graph(&mut self) {
        if self.graph_needs_sort {
            self.topological_sort.sort(&self.graph);
            self.graph_needs_sort = false;
        }
    }

    /// Remove a DSP and its connections
    ///
    /// If the DSP was routed to the output, the output returns to the DSP
    /// that was routed before it. The DSP is dropped on the garbage
    /// collection thread.
    pub fn remove_dsp(&mut self, id: Id) {
        if self.input_endpoint.is_some_and(|endpoint| endpoint.dsp_id == id) {
            self.input_endpoint = None;
        }

        self.output_endpoints.retain(|endpoint| endpoint.dsp_id != id);

        if let Some(dsp) = self.graph.remove_node(id) {
            let _ = self
                .garbage_collection_tx
                .try_send(GarbageCollectionCommand::DisposeDsp(dsp));
        }

        self.mark_graph_needs_sort();
    }

    pub fn request_parameter_change(&mut self, change_request: ParameterChangeRequest) {
        if let Some(dsp) = self.graph.get_node_mut(change_request.dsp_id) {
            dsp.request_parameter_change(change_request);
        }
    }

    pub fn cancel_parameter_changes(&mut self, cancel_request: CancelChangeRequest) {
        if let Some(dsp) = self.graph.get_node_mut(cancel_request.dsp_id) {
            dsp.cancel_parameter_changes(cancel_request);
        }
    }

    /// Connect two DSPs
    ///
    /// Connections that would create a cycle are ignored.
    pub fn add_connection(&mut self, connection: Connection) {
        let source_id = connection.source.dsp_id;
        let destination_id = connection.destination.dsp_id;

        if source_id == destination_id || self.graph.is_reachable(destination_id, source_id) {
            return;
        }

        if self
            .graph
            .add_edge(source_id, destination_id, connection)
            .is_some()
        {
            self.mark_graph_needs_sort();
        }
    }

    pub fn remove_connection(&mut self, connection: Connection) {
        if self
            .graph
            .remove_edge(connection.source.dsp_id, connection.destination.dsp_id)
            .is_some()
        {
            self.mark_graph_needs_sort();
        }
    }

    /// Route a DSP to the output, replacing the current one
    pub fn connect_to_output(&mut self, output_endpoint: Endpoint) {
        self.output_endpoints.retain(|endpoint| *endpoint != output_endpoint);

        if self.output_endpoints.len() == self.output_endpoints.capacity() {
            self.output_endpoints.remove(0);
        }

        self.output_endpoints.push(output_endpoint);
    }

    pub fn connect_to_input(&mut self, input_endpoint: Endpoint) {
        self.input_endpoint = Some(input_endpoint);
    }

    #[cfg(test)]
    pub fn dsp_count(&self) -> usize {
        self.graph.node_count()
    }

    #[cfg(test)]
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn process_dsps(
    ids_to_process: &[Id],
    free_buffer_pool: &mut BufferPool,
    assigned_buffer_pool: &mut AssignedBufferPool<Endpoint>,
    graph: &mut Graph<Box<Dsp>, Connection>,
    frame_count: usize,
    maximum_channel_count: usize,
    start_time: &Timestamp,
) {
    for dsp_id in ids_to_process {
        process_dsp(
            free_buffer_pool,
            assigned_buffer_pool,
            graph,
            *dsp_id,
            frame_count,
            maximum_channel_count,
            start_time,
        );
    }
}

/// Mix a source into a destination, spreading a mono source over every channel
fn mix_channels(
    source: &dyn AudioBuffer,
    source_channel_count: usize,
    destination: &mut dyn AudioBuffer,
    destination_channel_count: usize,
    frame_count: usize,
) {
    if source_channel_count == 1 && destination_channel_count > 1 {
        for channel in 0..destination_channel_count {
            destination.add_from(
                source,
                SampleLocation::origin(),
                SampleLocation::channel(channel),
                1,
                frame_count,
            );
        }
    } else {
        destination.add_from(
            source,
            SampleLocation::origin(),
            SampleLocation::origin(),
            std::cmp::min(source_channel_count, destination_channel_count),
            frame_count,
        );
    }
}

fn mix_incoming_connections(
    assigned_buffer_pool: &AssignedBufferPool<Endpoint>,
    graph: &Graph<Box<Dsp>, Connection>,
    dsp_id: Id,
    input_buffer: &mut dyn AudioBuffer,
    input_channel_count: usize,
    frame_count: usize,
    maximum_channel_count: usize,
) {
    for source_id in graph.node_iter(dsp_id, Direction::Incoming) {
        let source_endpoint = Endpoint::new(source_id, EndpointType::Output);

        let source_channel_count = match graph.get_node(source_id) {
            Some(source) => source.output_count().min(maximum_channel_count),
            None => continue,
        };

        if let Some(source_buffer) = assigned_buffer_pool.get(&source_endpoint) {
            mix_channels(
                source_buffer,
                source_channel_count,
                input_buffer,
                input_channel_count,
                frame_count,
            );
        }
    }
}

fn process_dsp(
    free_buffer_pool: &mut BufferPool,
    assigned_buffer_pool: &mut AssignedBufferPool<Endpoint>,
    graph: &mut Graph<Box<Dsp>, Connection>,
    dsp_id: Id,
    frame_count: usize,
    maximum_channel_count: usize,
    start_time: &Timestamp,
) {
    let (input_channel_count, output_channel_count) = match graph.get_node(dsp_id) {
        Some(dsp) => (
            dsp.input_count().min(maximum_channel_count),
            dsp.output_count().min(maximum_channel_count),
        ),
        None => return,
    };

    let input_endpoint = Endpoint::new(dsp_id, EndpointType::Input);
    let output_endpoint = Endpoint::new(dsp_id, EndpointType::Output);

    let mut input_buffer = match assigned_buffer_pool
        .remove(&input_endpoint)
        .or_else(|| free_buffer_pool.remove())
    {
        Some(buffer) => buffer,
        None => return,
    };

    let mut output_buffer = match free_buffer_pool.remove() {
        Some(buffer) => buffer,
        None => {
            free_buffer_pool.add(input_buffer);
            return;
        }
    };

    mix_incoming_connections(
        assigned_buffer_pool,
        graph,
        dsp_id,
        &mut input_buffer,
        input_channel_count,
        frame_count,
        maximum_channel_count,
    );

    if let Some(dsp) = graph.get_node_mut(dsp_id) {
        let input_slice = BorrowedAudioBuffer::slice_channels_and_frames(
            &input_buffer,
            input_channel_count,
            frame_count,
        );

        let mut output_slice = MutableBorrowedAudioBuffer::slice_channels_and_frames(
            &mut output_buffer,
            output_channel_count,
            frame_count,
        );

        dsp.process_audio(&input_slice, &mut output_slice, start_time);
    }

    free_buffer_pool.add(input_buffer);
    assigned_buffer_pool.add(output_buffer, &output_endpoint);
}
