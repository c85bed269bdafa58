use crossbeam::channel::Receiver;

use crate::Timestamp;

/// An event that can be scheduled on the audio thread
pub trait EventProcessorEvent {
    /// When the event should be applied
    fn get_time(&self) -> Timestamp;

    /// Whether receiving this event discards everything pending
    fn should_clear_queue(&self) -> bool;

    /// Orders events that share a time
    fn sequence_number(&self) -> usize;
}

/// Splits audio blocks at the positions of scheduled events
pub struct EventProcessor<Event>
where
    Event: EventProcessorEvent,
{
    pending_events: Vec<Event>,
    receive_channel: Receiver<Event>,
    sample_rate: usize,
}

impl<Event> EventProcessor<Event>
where
    Event: EventProcessorEvent,
{
    pub fn with_capacity(
        capacity: usize,
        receive_channel: Receiver<Event>,
        sample_rate: usize,
    ) -> Self {
        Self {
            pending_events: Vec::with_capacity(capacity),
            receive_channel,
            sample_rate,
        }
    }

    pub fn receive_events(&mut self) {
        let mut sort_required = false;

        while let Ok(event) = self.receive_channel.try_recv() {
            if event.should_clear_queue() {
                self.pending_events.clear();
            }

            self.pending_events.push(event);
            sort_required = true;
        }

        if sort_required {
            self.pending_events.sort_by(|a, b| {
                a.get_time()
                    .cmp(&b.get_time())
                    .then(a.sequence_number().cmp(&b.sequence_number()))
            });
        }
    }

    #[cfg(test)]
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn next_event_before(&mut self, end_time: &Timestamp) -> Option<Event> {
        match self.pending_events.first() {
            Some(next_event) if next_event.get_time() < *end_time => {
                Some(self.pending_events.remove(0))
            }
            _ => None,
        }
    }

    /// Find the next event in a block
    ///
    /// Returns the frame, relative to `frame_start_time`, at which to apply the
    /// event, or `frame_count` with no event if nothing is due in this block.
    /// Events scheduled before `current_frame_position` apply at
    /// `current_frame_position`.
    pub fn next_event(
        &mut self,
        frame_start_time: &Timestamp,
        current_frame_position: &Timestamp,
        frame_count: usize,
    ) -> (usize, Option<Event>) {
        let frame_end_time = frame_start_time.incremented_by_samples(frame_count, self.sample_rate);

        match self.next_event_before(&frame_end_time) {
            Some(next_event) => {
                let event_time = std::cmp::max(next_event.get_time(), *current_frame_position);
                let position_in_frame = event_time - *frame_start_time;
                let position_in_frame = position_in_frame.as_sample_index(self.sample_rate);

                (position_in_frame.min(frame_count), Some(next_event))
            }
            None => (frame_count, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct TestEvent {
        time: Timestamp,
        sequence_number: usize,
        clear: bool,
    }

    impl EventProcessorEvent for TestEvent {
        fn get_time(&self) -> Timestamp {
            self.time
        }

        fn should_clear_queue(&self) -> bool {
            self.clear
        }

        fn sequence_number(&self) -> usize {
            self.sequence_number
        }
    }

    fn event(seconds: f64, sequence_number: usize) -> TestEvent {
        TestEvent {
            time: Timestamp::from_seconds(seconds),
            sequence_number,
            clear: false,
        }
    }

    const SAMPLE_RATE: usize = 1_000;

    #[test]
    fn splits_block_at_event() {
        let (tx, rx) = crossbeam::channel::unbounded();
        let mut processor = EventProcessor::with_capacity(8, rx, SAMPLE_RATE);

        tx.send(event(0.1, 0)).unwrap();
        processor.receive_events();

        let start = Timestamp::zero();
        let (frame, first) = processor.next_event(&start, &start, 512);
        assert_eq!(frame, 100);
        assert!(first.is_some());

        let (frame, second) = processor.next_event(&start, &start, 512);
        assert_eq!(frame, 512);
        assert!(second.is_none());
    }

    #[test]
    fn future_events_wait_for_their_block() {
        let (tx, rx) = crossbeam::channel::unbounded();
        let mut processor = EventProcessor::with_capacity(8, rx, SAMPLE_RATE);

        tx.send(event(1.0, 0)).unwrap();
        processor.receive_events();

        let start = Timestamp::zero();
        assert_eq!(processor.next_event(&start, &start, 512), (512, None));

        let start = Timestamp::from_seconds(0.9);
        let (frame, event) = processor.next_event(&start, &start, 512);
        assert_eq!(frame, 100);
        assert!(event.is_some());
    }

    #[test]
    fn past_events_apply_at_the_current_position() {
        let (tx, rx) = crossbeam::channel::unbounded();
        let mut processor = EventProcessor::with_capacity(8, rx, SAMPLE_RATE);

        tx.send(event(0.0, 0)).unwrap();
        processor.receive_events();

        let start = Timestamp::from_seconds(2.0);
        let current = start.incremented_by_samples(10, SAMPLE_RATE);
        let (frame, event) = processor.next_event(&start, &current, 64);
        assert_eq!(frame, 10);
        assert!(event.is_some());
    }

    #[test]
    fn orders_events_by_time_then_sequence() {
        let (tx, rx) = crossbeam::channel::unbounded();
        let mut processor = EventProcessor::with_capacity(8, rx, SAMPLE_RATE);

        tx.send(event(0.2, 0)).unwrap();
        tx.send(event(0.1, 2)).unwrap();
        tx.send(event(0.1, 1)).unwrap();
        processor.receive_events();

        let start = Timestamp::zero();
        let (_, first) = processor.next_event(&start, &start, 512);
        let (_, second) = processor.next_event(&start, &start, 512);
        let (_, third) = processor.next_event(&start, &start, 512);

        assert_eq!(first.map(|event| event.sequence_number), Some(1));
        assert_eq!(second.map(|event| event.sequence_number), Some(2));
        assert_eq!(third.map(|event| event.sequence_number), Some(0));
    }

    #[test]
    fn clearing_event_discards_pending() {
        let (tx, rx) = crossbeam::channel::unbounded();
        let mut processor = EventProcessor::with_capacity(8, rx, SAMPLE_RATE);

        tx.send(event(0.1, 0)).unwrap();
        tx.send(TestEvent {
            time: Timestamp::zero(),
            sequence_number: 1,
            clear: true,
        })
        .unwrap();
        processor.receive_events();

        let start = Timestamp::zero();
        let (frame, cleared) = processor.next_event(&start, &start, 512);
        assert_eq!(frame, 0);
        assert!(cleared.is_some_and(|event| event.clear));
        assert!(!processor.has_pending_events());
    }
}
