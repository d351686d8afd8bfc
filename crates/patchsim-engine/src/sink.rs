//! Sample serialization.

use patchsim_core::AudioBlock;
use std::io::Write;

/// How rendered samples are written out.
///
/// Chosen once for a whole run. Both modes carry the same values; decoding
/// the human form reproduces the binary floats to the printed precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw native-endian `f32` pairs (left then right), no header, no
    /// length prefix. The consumer must know the platform convention.
    #[default]
    Binary,
    /// One text line per sample: `"<left> <right>"` with 8 digits after
    /// the decimal point.
    Human,
}

/// Streams rendered blocks to a writer in the chosen format.
///
/// The sink is the single reader of each block, immediately after the patch
/// fills it. Write failures are fatal to the run; there is no buffering
/// beyond what the inner writer provides.
pub struct SampleSink<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> SampleSink<W> {
    /// Wraps a writer in the chosen format.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// The serialization mode.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes one rendered block, interleaving left and right samples.
    pub fn write_block(&mut self, block: &AudioBlock) -> std::io::Result<()> {
        let left = block.left();
        let right = block.right();

        match self.format {
            OutputFormat::Binary => {
                for (l, r) in left.iter().zip(right.iter()) {
                    self.writer.write_all(&l.to_ne_bytes())?;
                    self.writer.write_all(&r.to_ne_bytes())?;
                }
            }
            OutputFormat::Human => {
                for (l, r) in left.iter().zip(right.iter()) {
                    writeln!(self.writer, "{l:.8} {r:.8}")?;
                }
            }
        }

        Ok(())
    }

    /// Flushes the inner writer.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    /// Unwraps the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
