use criterion::{criterion_group, criterion_main, Criterion};
use tonegraph::prelude::*;

struct Fixture {
    context: Box<dyn Context>,
    audio_process: Box<dyn AudioProcess + Send>,
    input_buffer: OwnedAudioBuffer,
    output_buffer: OwnedAudioBuffer,
    _oscillators: Vec<Oscillator>,
    _gain_layers: Vec<Vec<Gain>>,
}

impl Fixture {
    fn new(layer_count: usize, nodes_per_layer: usize) -> Self {
        assert!(layer_count > 0);
        assert!(nodes_per_layer > 0);

        let sample_rate = 48_000;
        let channel_count = 2;
        let frame_count = 4096;

        let (mut context, audio_process) = create_engine(sample_rate);

        let oscillators: Vec<Oscillator> = (0..nodes_per_layer)
            .map(|index| {
                let frequency = 110.0 * (index + 1) as f64;
                let mut oscillator = Oscillator::sine(context.as_ref(), frequency, 1);
                let _ = oscillator.start_now();
                oscillator
            })
            .collect();

        let gain_layers: Vec<Vec<Gain>> = (0..layer_count)
            .map(|_| {
                (0..nodes_per_layer)
                    .map(|_| {
                        let mut gain = Gain::new(context.as_ref(), channel_count);
                        gain.gain().set_value(1.0 / nodes_per_layer as f64);
                        gain
                    })
                    .collect()
            })
            .collect();

        oscillators.iter().for_each(|oscillator| {
            gain_layers[0]
                .iter()
                .for_each(|gain| oscillator.node.connect_to(&gain.node));
        });

        gain_layers.windows(2).for_each(|layers| {
            layers[0].iter().for_each(|from| {
                layers[1]
                    .iter()
                    .for_each(|to| from.node.connect_to(&to.node));
            });
        });

        if let Some(last_layer) = gain_layers.last() {
            last_layer
                .iter()
                .for_each(|gain| gain.node.connect_to(&context.destination().node));
        }

        context.start();

        Self {
            context,
            audio_process,
            input_buffer: OwnedAudioBuffer::new(frame_count, channel_count, sample_rate),
            output_buffer: OwnedAudioBuffer::new(frame_count, channel_count, sample_rate),
            _oscillators: oscillators,
            _gain_layers: gain_layers,
        }
    }

    fn process(&mut self) {
        self.audio_process
            .process(&self.input_buffer, &mut self.output_buffer);
        self.context.process_notifications();
    }
}

fn graph_benchmarks(c: &mut Criterion) {
    c.benchmark_group("Graph");

    for (name, layer_count, nodes_per_layer) in [
        ("single node graph", 1, 1),
        ("deep graph", 32, 2),
        ("wide graph", 2, 12),
        ("varied graph", 6, 6),
    ] {
        c.bench_function(name, |b| {
            let mut fixture = Fixture::new(layer_count, nodes_per_layer);

            b.iter(|| fixture.process());
        });
    }
}

criterion_group!(benches, graph_benchmarks);

criterion_main!(benches);
