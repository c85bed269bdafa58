use crate::{
    graph::{DspProcessor, ProcessContext},
    SampleLocation,
};

pub struct DestinationProcessor;

impl DspProcessor for DestinationProcessor {
    fn process_audio(&mut self, context: &mut ProcessContext) {
        let channel_count = std::cmp::min(
            context.input_buffer.channel_count(),
            context.output_buffer.channel_count(),
        );

        let frame_count = context.output_buffer.frame_count();

        context.output_buffer.copy_from(
            context.input_buffer,
            SampleLocation::origin(),
            SampleLocation::origin(),
            channel_count,
            frame_count,
        );
    }
}
