use crate::{
    commands::{CancelChangeRequest, Id, ParameterChangeRequest},
    AudioBuffer, Timestamp,
};

use super::DspParameters;

/// Everything a processor needs to render one block
pub struct ProcessContext<'a> {
    /// The mixed input to the node
    pub input_buffer: &'a dyn AudioBuffer,

    /// The buffer to render into
    pub output_buffer: &'a mut dyn AudioBuffer,

    /// The time of the first frame in the block
    pub start_time: &'a Timestamp,

    /// The values of the node's parameters for this block
    pub parameters: &'a DspParameters,
}

/// Renders audio for a node on the audio thread
pub trait DspProcessor {
    /// Render a block of audio into `context.output_buffer`
    fn process_audio(&mut self, context: &mut ProcessContext);
}

pub struct Dsp {
    id: Id,
    input_count: usize,
    output_count: usize,
    processor: Box<dyn DspProcessor + Send + Sync>,
    parameters: DspParameters,
}

impl Dsp {
    pub fn new(
        id: Id,
        input_count: usize,
        output_count: usize,
        processor: Box<dyn DspProcessor + Send + Sync>,
        parameters: DspParameters,
    ) -> Self {
        Self {
            id,
            input_count,
            output_count,
            processor,
            parameters,
        }
    }

    pub fn get_id(&self) -> Id {
        self.id
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn output_count(&self) -> usize {
        self.output_count
    }

    pub fn process_audio(
        &mut self,
        input_buffer: &dyn AudioBuffer,
        output_buffer: &mut dyn AudioBuffer,
        start_time: &Timestamp,
    ) {
        self.parameters.process(
            start_time,
            output_buffer.frame_count(),
            output_buffer.sample_rate(),
        );

        self.processor.process_audio(&mut ProcessContext {
            input_buffer,
            output_buffer,
            start_time,
            parameters: &self.parameters,
        });
    }

    pub fn request_parameter_change(&mut self, change_request: ParameterChangeRequest) {
        if let Some(parameter) = self
            .parameters
            .get_parameter_mut(change_request.parameter_id)
        {
            parameter.add_parameter_change(change_request.change);
        }
    }

    pub fn cancel_parameter_changes(&mut self, cancel_request: CancelChangeRequest) {
        if let Some(parameter) = self
            .parameters
            .get_parameter_mut(cancel_request.parameter_id)
        {
            parameter.cancel_parameter_changes(cancel_request.from_time);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{
        parameter::{make_parameter_value, ParameterChange, RealtimeAudioParameter},
        OwnedAudioBuffer, SampleLocation,
    };

    use super::*;

    struct WriteParameter;

    impl DspProcessor for WriteParameter {
        fn process_audio(&mut self, context: &mut ProcessContext) {
            let frame_count = context.output_buffer.frame_count();
            let values = context.parameters.get_parameter_values("level", frame_count);

            for (frame, value) in values.iter().enumerate() {
                context
                    .output_buffer
                    .set_sample(SampleLocation::frame(frame), *value as f32);
            }
        }
    }

    fn make_dsp() -> (Dsp, Id) {
        let parameter_id = Id::generate();
        let parameter =
            RealtimeAudioParameter::new(parameter_id, "level", make_parameter_value(0.0), 64);

        let dsp = Dsp::new(
            Id::generate(),
            0,
            1,
            Box::new(WriteParameter),
            DspParameters::new([parameter]),
        );

        (dsp, parameter_id)
    }

    #[test]
    fn parameters_are_rendered_before_processing() {
        let (mut dsp, parameter_id) = make_dsp();
        let sample_rate = 1_000;

        dsp.request_parameter_change(ParameterChangeRequest {
            dsp_id: dsp.get_id(),
            parameter_id,
            change: ParameterChange::immediate(0.5, Timestamp::from_samples(10.0, sample_rate)),
        });

        let input = OwnedAudioBuffer::new(32, 1, sample_rate);
        let mut output = OwnedAudioBuffer::new(32, 1, sample_rate);

        dsp.process_audio(&input, &mut output, &Timestamp::zero());

        assert_relative_eq!(output.get_sample(SampleLocation::frame(9)), 0.0);
        assert_relative_eq!(output.get_sample(SampleLocation::frame(10)), 0.5);
    }

    #[test]
    fn requests_for_unknown_parameters_are_ignored() {
        let (mut dsp, _) = make_dsp();

        dsp.request_parameter_change(ParameterChangeRequest {
            dsp_id: dsp.get_id(),
            parameter_id: Id::generate(),
            change: ParameterChange::immediate(1.0, Timestamp::zero()),
        });

        let input = OwnedAudioBuffer::new(16, 1, 1_000);
        let mut output = OwnedAudioBuffer::new(16, 1, 1_000);

        dsp.process_audio(&input, &mut output, &Timestamp::zero());

        assert!(output.is_silent());
    }
}
