//! The do-nothing patch.

use patchsim_core::{AudioBlock, MidiMessage, Patch, PatchError};

/// Writes silence and ignores all control input.
///
/// Loaded as the default so a bare run costs nothing; also handy as a
/// baseline when inspecting serializer output.
pub struct SilencePatch {
    sample_rate: f32,
}

impl SilencePatch {
    /// Creates the patch at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

impl Patch for SilencePatch {
    fn process_audio(&mut self, block: &mut AudioBlock) -> Result<(), PatchError> {
        let (left, right) = block.channels_mut();
        left.fill(0.0);
        right.fill(0.0);
        Ok(())
    }

    fn process_midi(&mut self, _message: MidiMessage) -> Result<(), PatchError> {
        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
