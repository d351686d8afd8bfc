//! The block-by-block render loop.

use crate::schedule::EventSchedule;
use crate::sink::SampleSink;
use patchsim_core::{AudioBlock, Patch};
use std::io::Write;

/// Fixed processing block size of the simulated device, in samples.
pub const BLOCK_CAPACITY: usize = 1024;

/// Parameters of a render run.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// Total number of samples to produce.
    pub total_samples: u64,
    /// Samples per processing block; the final block may be shorter.
    pub block_capacity: usize,
    /// Sample rate in Hz, shared with the patch under simulation.
    pub sample_rate: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            total_samples: 44100,
            block_capacity: BLOCK_CAPACITY,
            sample_rate: 44100.0,
        }
    }
}

/// Counters reported after a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Blocks produced.
    pub blocks: u64,
    /// Samples produced (equals the requested total on success).
    pub samples: u64,
    /// Events delivered to the patch.
    pub events_delivered: usize,
}

/// Per-run cursor state. Created when a run starts, dropped when it ends.
struct RenderSession {
    total_samples: u64,
    block_capacity: usize,
    cursor_offset: u64,
    next_event: usize,
}

/// Drives a patch over a schedule, block by block, into a sink.
///
/// The block buffer is allocated once at construction and reused for every
/// step; each step zeroes it, sets its logical length, delivers at most one
/// due event, invokes the patch, and serializes the result. Block lengths
/// always partition the requested total exactly: every block is full-size
/// except possibly the last.
///
/// Event delivery resolution is one event per block: if several events fall
/// due within one block's span, only the earliest is delivered on that
/// step, and the rest follow one per subsequent step — or never, when the
/// run ends first.
pub struct Renderer {
    config: RenderConfig,
    block: AudioBlock,
}

impl Renderer {
    /// Creates a renderer, allocating its block buffer.
    ///
    /// # Panics
    ///
    /// Panics if the configured block capacity is zero.
    pub fn new(config: RenderConfig) -> Self {
        assert!(config.block_capacity > 0, "block capacity must be positive");
        Self {
            block: AudioBlock::new(config.block_capacity),
            config,
        }
    }

    /// The run parameters.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders the whole run.
    ///
    /// Any error from the patch or the sink aborts immediately; blocks
    /// serialized before the failure are not retracted.
    pub fn run<W: Write>(
        &mut self,
        patch: &mut dyn Patch,
        schedule: &EventSchedule,
        sink: &mut SampleSink<W>,
    ) -> crate::Result<RenderStats> {
        let mut session = RenderSession {
            total_samples: self.config.total_samples,
            block_capacity: self.config.block_capacity,
            cursor_offset: 0,
            next_event: 0,
        };
        let mut stats = RenderStats::default();

        tracing::debug!(
            total_samples = session.total_samples,
            block_capacity = session.block_capacity,
            sample_rate = f64::from(self.config.sample_rate),
            events = schedule.len(),
            "render start"
        );

        while session.cursor_offset < session.total_samples {
            let remaining = session.total_samples - session.cursor_offset;
            let current = (session.block_capacity as u64).min(remaining) as usize;

            self.block.clear();
            self.block.set_len(current);

            if let Some(event) = schedule.get(session.next_event) {
                if event.offset <= session.cursor_offset {
                    tracing::debug!(
                        offset = event.offset,
                        cursor = session.cursor_offset,
                        "delivering event"
                    );
                    patch.process_midi(event.message)?;
                    session.next_event += 1;
                    stats.events_delivered += 1;
                }
            }

            patch.process_audio(&mut self.block)?;
            sink.write_block(&self.block)?;

            session.cursor_offset += current as u64;
            stats.blocks += 1;
            stats.samples += current as u64;
        }

        sink.flush()?;

        tracing::debug!(
            blocks = stats.blocks,
            events_delivered = stats.events_delivered,
            "render complete"
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::OutputFormat;
    use crate::Error;
    use patchsim_core::{MidiMessage, PatchError};

    /// Records every call it receives; leaves all blocks untouched.
    #[derive(Default)]
    struct ProbePatch {
        block_lens: Vec<usize>,
        midi: Vec<MidiMessage>,
        fail_on_block: Option<usize>,
    }

    impl Patch for ProbePatch {
        fn process_audio(&mut self, block: &mut AudioBlock) -> Result<(), PatchError> {
            if self.fail_on_block == Some(self.block_lens.len()) {
                return Err(PatchError::new("probe failure"));
            }
            self.block_lens.push(block.len());
            Ok(())
        }

        fn process_midi(&mut self, message: MidiMessage) -> Result<(), PatchError> {
            self.midi.push(message);
            Ok(())
        }

        fn sample_rate(&self) -> f32 {
            44100.0
        }
    }

    fn run_probe(
        total_samples: u64,
        block_capacity: usize,
        specs: &[&str],
    ) -> (ProbePatch, Vec<u8>, RenderStats) {
        let schedule = EventSchedule::parse(specs).unwrap();
        let mut patch = ProbePatch::default();
        let mut sink = SampleSink::new(Vec::new(), OutputFormat::Binary);
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

    #[test]
    fn blocks_partition_the_requested_total() {
        let (patch, _, stats) = run_probe(2500, 1024, &[]);
        assert_eq!(patch.block_lens, vec![1024, 1024, 452]);
        assert_eq!(stats.blocks, 3);
        assert_eq!(stats.samples, 2500);
    }

    #[test]
    fn zero_samples_renders_nothing() {
        let (patch, bytes, stats) = run_probe(0, 1024, &["0:60"]);
        assert!(patch.block_lens.is_empty());
        assert!(patch.midi.is_empty());
        assert!(bytes.is_empty());
        assert_eq!(stats, RenderStats::default());
    }

    #[test]
    fn untouched_blocks_serialize_as_zeros() {
        let (_, bytes, _) = run_probe(100, 64, &[]);
        assert_eq!(bytes.len(), 100 * 2 * 4);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn at_most_one_event_per_block() {
        // Both events are due in the only block; only the earliest is
        // delivered, the other never gets a later block.
        let (patch, _, stats) = run_probe(1024, 1024, &["0:60", "10:64"]);
        assert_eq!(patch.midi.len(), 1);
        assert_eq!(patch.midi[0].note(), 60);
        assert_eq!(stats.events_delivered, 1);
    }

    #[test]
    fn pending_events_deliver_on_later_blocks() {
        let (patch, _, _) = run_probe(2048, 1024, &["0:60", "1100:64"]);
        assert_eq!(patch.midi.len(), 2);
        assert_eq!(patch.midi[0].note(), 60);
        assert_eq!(patch.midi[1].note(), 64);
    }

    #[test]
    fn clustered_events_drain_one_per_block() {
        // Three events due at once across four blocks: delivered on three
        // consecutive block starts.
        let (patch, _, _) = run_probe(4096, 1024, &["0:60", "0:62", "0:64"]);
        assert_eq!(
            patch.midi.iter().map(|m| m.note()).collect::<Vec<_>>(),
            vec![60, 62, 64]
        );
    }

    #[test]
    fn event_before_audio_within_a_step() {
        // An event at offset 0 must arrive before the first block is filled.
        struct OrderPatch {
            saw_midi_first: Option<bool>,
        }
        impl Patch for OrderPatch {
            fn process_audio(&mut self, _block: &mut AudioBlock) -> Result<(), PatchError> {
                self.saw_midi_first.get_or_insert(false);
                Ok(())
            }
            fn process_midi(&mut self, _message: MidiMessage) -> Result<(), PatchError> {
                self.saw_midi_first.get_or_insert(true);
                Ok(())
            }
            fn sample_rate(&self) -> f32 {
                44100.0
            }
        }

        let schedule = EventSchedule::parse(&["60"]).unwrap();
        let mut patch = OrderPatch {
            saw_midi_first: None,
        };
        let mut sink = SampleSink::new(Vec::new(), OutputFormat::Binary);
        let config = RenderConfig {
            total_samples: 64,
            block_capacity: 64,
            sample_rate: 44100.0,
        };
        Renderer::new(config)
            .run(&mut patch, &schedule, &mut sink)
            .unwrap();
        assert_eq!(patch.saw_midi_first, Some(true));
    }

    #[test]
    fn patch_failure_aborts_but_keeps_prior_output() {
        let schedule = EventSchedule::default();
        let mut patch = ProbePatch {
            fail_on_block: Some(2),
            ..ProbePatch::default()
        };
        let mut sink = SampleSink::new(Vec::new(), OutputFormat::Binary);
        let config = RenderConfig {
            total_samples: 3000,
            block_capacity: 1024,
            sample_rate: 44100.0,
        };

        let err = Renderer::new(config)
            .run(&mut patch, &schedule, &mut sink)
            .unwrap_err();
        assert!(matches!(err, Error::Patch(_)));

        // Two full blocks made it out before the failure.
        assert_eq!(sink.into_inner().len(), 2 * 1024 * 2 * 4);
    }

    #[test]
    fn sink_failure_aborts_the_run() {
        struct FailingWriter;
        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("stream closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let schedule = EventSchedule::default();
        let mut patch = ProbePatch::default();
        let mut sink = SampleSink::new(FailingWriter, OutputFormat::Binary);
        let config = RenderConfig {
            total_samples: 64,
            block_capacity: 64,
            sample_rate: 44100.0,
        };

        let err = Renderer::new(config)
            .run(&mut patch, &schedule, &mut sink)
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn square_patch_renders_gate_and_tone() {
        use patchsim_patches::SquarePatch;

        let schedule = EventSchedule::parse(&["69"]).unwrap();
        let config = RenderConfig {
            total_samples: 256,
            block_capacity: 64,
            sample_rate: 44100.0,
        };
        let mut patch = SquarePatch::new(config.sample_rate);
        let mut sink = SampleSink::new(Vec::new(), OutputFormat::Human);

        Renderer::new(config)
            .run(&mut patch, &schedule, &mut sink)
            .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 256);
        // Gate (left column) is high for the whole run.
        assert!(lines.iter().all(|line| line.starts_with("1.00000000 ")));
    }
}
