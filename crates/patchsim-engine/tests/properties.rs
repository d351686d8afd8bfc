//! Property-based tests for the render pipeline.
//!
//! Uses proptest to check block partitioning, serialization-format
//! agreement, and schedule ordering over randomized inputs.

use proptest::prelude::*;

use patchsim_core::{AudioBlock, MidiMessage, Patch, PatchError};
use patchsim_engine::{
    EventSchedule, OutputFormat, RenderConfig, RenderStats, Renderer, SampleSink, TimedEvent,
};

/// Replays a fixed sample sequence: left gets the value, right its negation.
struct PlaybackPatch {
    samples: Vec<f32>,
    pos: usize,
    block_lens: Vec<usize>,
}

impl PlaybackPatch {
    fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            pos: 0,
            block_lens: Vec::new(),
        }
    }
}

impl Patch for PlaybackPatch {
    fn process_audio(&mut self, block: &mut AudioBlock) -> Result<(), PatchError> {
        self.block_lens.push(block.len());
        let (left, right) = block.channels_mut();
        for i in 0..left.len() {
            let value = self.samples.get(self.pos).copied().unwrap_or(0.0);
            left[i] = value;
            right[i] = -value;
            self.pos += 1;
        }
        Ok(())
    }

    fn process_midi(&mut self, _message: MidiMessage) -> Result<(), PatchError> {
        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        44100.0
    }
}

fn render(
    total_samples: u64,
    block_capacity: usize,
    samples: Vec<f32>,
    format: OutputFormat,
) -> (PlaybackPatch, Vec<u8>, RenderStats) {
    let schedule = EventSchedule::default();
    let mut patch = PlaybackPatch::new(samples);
    let mut sink = SampleSink::new(Vec::new(), format);
    let config = RenderConfig {
        total_samples,
        block_capacity,
        sample_rate: 44100.0,
    };
    let stats = Renderer::new(config)
        .run(&mut patch, &schedule, &mut sink)
        .unwrap();
    (patch, sink.into_inner(), stats)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// For any total and positive block capacity, block lengths sum exactly
    /// to the total, never exceed the capacity, and only the final block
    /// may be short.
    #[test]
    fn block_lengths_partition_total(
        total_samples in 0u64..20_000,
        block_capacity in 1usize..2048,
    ) {
        let (patch, bytes, stats) =
            render(total_samples, block_capacity, Vec::new(), OutputFormat::Binary);

        let sum: u64 = patch.block_lens.iter().map(|&len| len as u64).sum();
        prop_assert_eq!(sum, total_samples);
        prop_assert!(patch.block_lens.iter().all(|&len| len <= block_capacity));
        if let Some((&last, full)) = patch.block_lens.split_last() {
            prop_assert!(full.iter().all(|&len| len == block_capacity));
            prop_assert!(last > 0);
        }

        prop_assert_eq!(stats.samples, total_samples);
        prop_assert_eq!(bytes.len() as u64, total_samples * 2 * 4);
    }

    /// Binary and human output decode to the same values, within the
    /// precision the human format prints.
    #[test]
    fn output_formats_agree(
        samples in prop::collection::vec(-1.0f32..=1.0, 1..400),
        block_capacity in 1usize..96,
    ) {
        let total = samples.len() as u64;

        let (_, raw, _) =
            render(total, block_capacity, samples.clone(), OutputFormat::Binary);
        let binary: Vec<f32> = raw
            .chunks_exact(4)
            .map(|chunk| f32::from_ne_bytes(chunk.try_into().unwrap()))
            .collect();

        let (_, text, _) = render(total, block_capacity, samples, OutputFormat::Human);
        let human: Vec<f32> = String::from_utf8(text)
            .unwrap()
            .split_whitespace()
            .map(|field| field.parse().unwrap())
            .collect();

        prop_assert_eq!(binary.len(), human.len());
        for (a, b) in binary.iter().zip(human.iter()) {
            prop_assert!((a - b).abs() < 1e-7, "{} vs {}", a, b);
        }
    }

    /// Schedules come out ordered by offset with note values masked to
    /// 7 bits, whatever the input order.
    #[test]
    fn schedules_are_ordered_and_masked(
        events in prop::collection::vec((0u64..10_000, 0u8..=255), 0..32),
    ) {
        let schedule = EventSchedule::from_events(
            events
                .iter()
                .map(|&(offset, note)| TimedEvent {
                    offset,
                    message: MidiMessage::note_on(note, 0x7F),
                })
                .collect(),
        );

        prop_assert_eq!(schedule.len(), events.len());
        for pair in schedule.events().windows(2) {
            prop_assert!(pair[0].offset <= pair[1].offset);
        }
        for event in schedule.events() {
            prop_assert!(event.message.note() <= 0x7F);
        }
    }
}
