use std::collections::HashMap;

use crate::{commands::Id, parameter::RealtimeAudioParameter, Timestamp};

/// The realtime parameters owned by a DSP
pub struct DspParameters {
    parameters: HashMap<Id, RealtimeAudioParameter>,
}

impl DspParameters {
    pub fn new<const N: usize>(parameters: [RealtimeAudioParameter; N]) -> Self {
        Self {
            parameters: parameters
                .map(|parameter| (parameter.get_id(), parameter))
                .into(),
        }
    }

    pub fn empty() -> Self {
        Self {
            parameters: HashMap::new(),
        }
    }

    pub fn get_parameter_mut(&mut self, id: Id) -> Option<&mut RealtimeAudioParameter> {
        self.parameters.get_mut(&id)
    }

    pub fn get_parameter_by_name(&self, name: &str) -> Option<&RealtimeAudioParameter> {
        self.parameters
            .values()
            .find(|parameter| parameter.get_name() == name)
    }

    /// The rendered values for the current block
    ///
    /// Returns an empty slice if there is no parameter with this name.
    pub fn get_parameter_values(&self, name: &str, frame_count: usize) -> &[f64] {
        match self.get_parameter_by_name(name) {
            Some(parameter) => {
                let values = parameter.get_values();
                &values[..frame_count.min(values.len())]
            }
            None => {
                debug_assert!(false, "Missing parameter: {name}");
                &[]
            }
        }
    }

    pub fn process(&mut self, start_time: &Timestamp, frame_count: usize, sample_rate: usize) {
        self.parameters
            .values_mut()
            .for_each(|parameter| parameter.process(start_time, frame_count, sample_rate));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::parameter::make_parameter_value;

    use super::*;

    fn make_parameter(name: &'static str, value: f64) -> RealtimeAudioParameter {
        RealtimeAudioParameter::new(Id::generate(), name, make_parameter_value(value), 64)
    }

    #[test]
    fn looks_up_values_by_name() {
        let mut parameters =
            DspParameters::new([make_parameter("frequency", 440.0), make_parameter("gain", 0.5)]);

        parameters.process(&Timestamp::zero(), 32, 44_100);

        let frequency = parameters.get_parameter_values("frequency", 32);
        assert_eq!(frequency.len(), 32);
        assert!(frequency.iter().all(|value| *value == 440.0));

        let gain = parameters.get_parameter_values("gain", 16);
        assert_eq!(gain.len(), 16);
        assert_relative_eq!(gain[0], 0.5);
    }

    #[test]
    fn empty_has_no_parameters() {
        let parameters = DspParameters::empty();
        assert!(parameters.is_empty());
        assert!(parameters.get_parameter_by_name("gain").is_none());
    }
}
