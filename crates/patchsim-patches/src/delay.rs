//! Pure delay: echoes the input from one second ago.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use patchsim_core::{AudioBlock, MidiMessage, Patch, PatchError};

/// Seconds of history kept in the ring buffer.
const HISTORY_SECS: usize = 4;

/// Seconds looked back for the echo tap.
const TAP_SECS: usize = 1;

/// Mono echo with a fixed one-second tap.
///
/// Each block the patch mixes the incoming channels down to mono (clamped),
/// records the result into a four-second ring buffer, then replaces both
/// channels with the history from one second earlier. Until a second of
/// audio has accumulated the output is silence.
pub struct DelayPatch {
    sample_rate: f32,
    history: Vec<f32>,
    write_pos: usize,
}

impl DelayPatch {
    /// Creates the patch at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        let capacity = (sample_rate as usize * HISTORY_SECS).max(1);
        Self {
            sample_rate,
            history: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// The echo tap distance in samples.
    fn tap_samples(&self) -> usize {
        self.sample_rate as usize * TAP_SECS
    }
}

impl Patch for DelayPatch {
    fn process_audio(&mut self, block: &mut AudioBlock) -> Result<(), PatchError> {
        let len = block.len();
        let capacity = self.history.len();
        let (left, right) = block.channels_mut();

        for i in 0..len {
            let sample = (left[i] + right[i]).clamp(-1.0, 1.0);
            self.history[self.write_pos] = sample;
            self.write_pos = (self.write_pos + 1) % capacity;
        }

        let back = self.tap_samples();
        let from = (self.write_pos + capacity - (back + len) % capacity) % capacity;
        for i in 0..len {
            let sample = self.history[(from + i) % capacity];
            left[i] = sample;
            right[i] = sample;
        }

        Ok(())
    }

    fn process_midi(&mut self, _message: MidiMessage) -> Result<(), PatchError> {
        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
