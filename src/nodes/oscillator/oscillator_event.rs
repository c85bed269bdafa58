use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{utility::EventProcessorEvent, Timestamp};

#[derive(Debug, PartialEq)]
pub enum OscillatorEventType {
    Start,
    Stop,
    SetWavetable(Vec<f64>),
}

fn next_sequence_number() -> usize {
    static SEQUENCE_NUMBER: AtomicUsize = AtomicUsize::new(0);
    SEQUENCE_NUMBER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug)]
pub struct OscillatorEvent {
    sequence_number: usize,
    time: Timestamp,
    event_type: OscillatorEventType,
}

impl OscillatorEvent {
    pub fn start(start_at_time: Timestamp) -> Self {
        Self {
            sequence_number: next_sequence_number(),
            time: start_at_time,
            event_type: OscillatorEventType::Start,
        }
    }

    pub fn stop(stop_at_time: Timestamp) -> Self {
        Self {
            sequence_number: next_sequence_number(),
            time: stop_at_time,
            event_type: OscillatorEventType::Stop,
        }
    }

    pub fn set_wavetable(wavetable: Vec<f64>) -> Self {
        Self {
            sequence_number: next_sequence_number(),
            time: Timestamp::zero(),
            event_type: OscillatorEventType::SetWavetable(wavetable),
        }
    }

    pub fn into_event_type(self) -> OscillatorEventType {
        self.event_type
    }
}

impl EventProcessorEvent for OscillatorEvent {
    fn get_time(&self) -> Timestamp {
        self.time
    }

    fn should_clear_queue(&self) -> bool {
        false
    }

    fn sequence_number(&self) -> usize {
        self.sequence_number
    }
}
