use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use crossbeam::channel::Receiver;

use crate::{
    buffer::MutableBorrowedAudioBuffer, commands::Command, AudioBuffer, AudioProcess,
    BorrowedAudioBuffer, Timestamp,
};

use super::dsp_graph::DspGraph;

/// The realtime side of the engine
pub struct Processor {
    started: bool,
    sample_rate: usize,
    maximum_frame_count: usize,
    sample_position: usize,
    command_rx: Receiver<Command>,
    graph: DspGraph,
    timestamp: Arc<AtomicI64>,
}

impl Processor {
    pub fn new(
        sample_rate: usize,
        maximum_frame_count: usize,
        maximum_channel_count: usize,
        command_rx: Receiver<Command>,
        timestamp: Arc<AtomicI64>,
    ) -> Self {
        Self {
            started: false,
            sample_rate,
            maximum_frame_count,
            sample_position: 0,
            command_rx,
            graph: DspGraph::new(maximum_frame_count, maximum_channel_count, sample_rate),
            timestamp,
        }
    }

    fn current_time(&self) -> Timestamp {
        Timestamp::from_samples(self.sample_position as f64, self.sample_rate)
    }

    fn process_commands(&mut self) {
        while let Ok(command) = self.command_rx.try_recv() {
            match command {
                Command::Start => self.started = true,
                Command::Stop => self.started = false,
                Command::AddDsp(dsp) => self.graph.add_dsp(dsp),
                Command::RemoveDsp(id) => self.graph.remove_dsp(id),
                Command::AddConnection(connection) => self.graph.add_connection(connection),
                Command::RemoveConnection(connection) => {
                    self.graph.remove_connection(connection)
                }
                Command::ConnectToInput(endpoint) => self.graph.connect_to_input(endpoint),
                Command::ConnectToOutput(endpoint) => self.graph.connect_to_output(endpoint),
                Command::ParameterValueChange(change_request) => {
                    self.graph.request_parameter_change(change_request)
                }
                Command::CancelParameterChanges(cancel_request) => {
                    self.graph.cancel_parameter_changes(cancel_request)
                }
            }
        }
    }

    fn publish_time(&self) {
        self.timestamp
            .store(self.current_time().as_raw_i64(), Ordering::Release);
    }
}

impl AudioProcess for Processor {
    fn process(&mut self, input_buffer: &dyn AudioBuffer, output_buffer: &mut dyn AudioBuffer) {
        self.process_commands();

        if !self.started {
            output_buffer.clear();
            return;
        }

        let frame_count = output_buffer.frame_count();
        let mut offset = 0;

        while offset < frame_count {
            let chunk_size = std::cmp::min(frame_count - offset, self.maximum_frame_count);

            let input_offset = std::cmp::min(offset, input_buffer.frame_count());
            let input_chunk_size =
                std::cmp::min(chunk_size, input_buffer.frame_count() - input_offset);

            let input_slice =
                BorrowedAudioBuffer::slice_frames(input_buffer, input_offset, input_chunk_size);
            let mut output_slice =
                MutableBorrowedAudioBuffer::slice_frames(output_buffer, offset, chunk_size);

            let start_time = self.current_time();
            self.graph
                .process(&input_slice, &mut output_slice, &start_time);

            self.sample_position += chunk_size;
            offset += chunk_size;
        }

        self.publish_time();
    }
}

#[cfg(test)]
mod tests {
    use crate::{OwnedAudioBuffer, SampleLocation};

    use super::*;

    fn make_processor(
        maximum_frame_count: usize,
    ) -> (Processor, crossbeam::channel::Sender<Command>, Arc<AtomicI64>) {
        let (command_tx, command_rx) = crossbeam::channel::unbounded();
        let timestamp = Arc::new(AtomicI64::new(0));
        let processor = Processor::new(
            1_000,
            maximum_frame_count,
            2,
            command_rx,
            Arc::clone(&timestamp),
        );

        (processor, command_tx, timestamp)
    }

    fn published_time(timestamp: &AtomicI64) -> Timestamp {
        Timestamp::from_raw_i64(timestamp.load(Ordering::Acquire))
    }

    #[test]
    fn outputs_silence_and_holds_time_while_stopped() {
        let (mut processor, _command_tx, timestamp) = make_processor(64);

        let input = OwnedAudioBuffer::new(100, 2, 1_000);
        let mut output = OwnedAudioBuffer::white_noise(100, 2, 1_000);

        processor.process(&input, &mut output);

        assert!(output.is_silent());
        assert_eq!(published_time(&timestamp), Timestamp::zero());
    }

    #[test]
    fn advances_time_in_chunks_once_started() {
        let (mut processor, command_tx, timestamp) = make_processor(64);

        command_tx.send(Command::Start).expect("channel should be open");

        let input = OwnedAudioBuffer::new(100, 2, 1_000);
        let mut output = OwnedAudioBuffer::new(100, 2, 1_000);

        processor.process(&input, &mut output);
        assert_eq!(published_time(&timestamp), Timestamp::from_seconds(0.1));

        command_tx.send(Command::Stop).expect("channel should be open");
        processor.process(&input, &mut output);
        assert_eq!(published_time(&timestamp), Timestamp::from_seconds(0.1));
    }

    #[test]
    fn accepts_shorter_input_buffers() {
        let (mut processor, command_tx, _timestamp) = make_processor(64);

        command_tx.send(Command::Start).expect("channel should be open");

        let input = OwnedAudioBuffer::new(10, 1, 1_000);
        let mut output = OwnedAudioBuffer::new(200, 2, 1_000);
        output.set_sample(SampleLocation::new(1, 150), 1.0);

        processor.process(&input, &mut output);

        assert!(output.is_silent());
    }
}
