//! CV/gate square-wave synth driven by a held-note stack.

use crate::note_stack::{MAX_HELD, NoteStack};
use patchsim_core::{
    AudioBlock, MIDDLE_C, MidiMessage, ParameterBank, ParameterId, Patch, PatchError, midi_to_freq,
};

/// Fixed-point sub-steps per sample of phase advance.
const PHASE_RADIX: u32 = 16;

/// Length of the gate notch emitted on retrigger, in samples.
const RETRIG_SAMPLES: u32 = 16;

/// One square oscillator in fixed-point phase representation.
#[derive(Clone, Copy, Debug, Default)]
struct SquarePhase {
    high: bool,
    max: u32,
    phase: u32,
}

/// Square-wave synthesizer with CV/gate style output.
///
/// The right channel sums a square oscillator per held note, scaled by the
/// `Amp` parameter and clamped to [-1, 1]. The left channel carries the
/// gate: 1.0 while any key is down, with a short zero notch when a new note
/// arrives over a high gate or when the sounding note is released
/// (retrigger for downstream envelope-style listeners).
pub struct SquarePatch {
    sample_rate: f32,
    params: ParameterBank,
    held: NoteStack,
    /// Oscillator state parallel to `held`, index for index.
    phases: [SquarePhase; MAX_HELD],
    /// Note currently driving the CV output.
    last_note: u8,
    gate: bool,
    retrig: u32,
}

impl SquarePatch {
    /// Creates the patch at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        let mut params = ParameterBank::new();
        params.register(ParameterId::A, "Amp");
        params.set(ParameterId::A, 0.5);
        Self {
            sample_rate,
            params,
            held: NoteStack::new(),
            phases: [SquarePhase::default(); MAX_HELD],
            last_note: MIDDLE_C,
            gate: false,
            retrig: 0,
        }
    }

    /// Notes currently held, oldest first.
    pub fn held_notes(&self) -> impl Iterator<Item = u8> + '_ {
        self.held.iter()
    }

    fn start_note(&mut self, at: usize, note: u8) {
        let half_period = (self.sample_rate / 2.0) / midi_to_freq(note);
        self.phases[at] = SquarePhase {
            high: false,
            max: (half_period * PHASE_RADIX as f32) as u32,
            phase: 0,
        };
    }

    /// Removes the stack entry at `at`, keeping the phase array aligned.
    fn kill_note(&mut self, at: usize) -> u8 {
        let note = self.held.remove_at(at);
        for slot in at..self.held.len() {
            self.phases[slot] = self.phases[slot + 1];
        }
        note
    }
}

impl Patch for SquarePatch {
    fn process_audio(&mut self, block: &mut AudioBlock) -> Result<(), PatchError> {
        let amp = self.params.get(ParameterId::A) / 4.0;
        let len = block.len();

        let right = block.right_mut();
        for slot in 0..self.held.len() {
            let osc = &mut self.phases[slot];
            for sample in right.iter_mut() {
                *sample += if osc.high { 1.0 } else { -1.0 };
                osc.phase += PHASE_RADIX;
                if osc.phase > osc.max {
                    osc.phase -= osc.max;
                    osc.high = !osc.high;
                }
            }
        }
        for sample in right.iter_mut() {
            *sample = (*sample * amp).clamp(-1.0, 1.0);
        }

        let level = if self.gate { 1.0 } else { 0.0 };
        let left = block.left_mut();
        let mut i = 0;
        while self.retrig > 0 && i < len {
            left[i] = 0.0;
            i += 1;
            self.retrig -= 1;
        }
        for sample in &mut left[i..] {
            *sample = level;
        }

        Ok(())
    }

    fn process_midi(&mut self, message: MidiMessage) -> Result<(), PatchError> {
        if !message.is_note_on() && !message.is_note_off() {
            return Ok(());
        }
        let note = message.note();

        // Key lifted, or a double down for the same key: pull it from the
        // stack either way.
        let removed = self.held.position(note).map(|at| self.kill_note(at));

        if message.is_note_on() {
            self.last_note = note;
            if self.held.is_full() {
                // Stack overflowed; forget the oldest note.
                self.kill_note(0);
            }
            let at = self.held.push(note);
            self.start_note(at, note);
            if self.gate {
                // Retrig only if the gate was already high.
                self.retrig = RETRIG_SAMPLES;
            }
            self.gate = true;
        } else {
            if removed == Some(self.last_note) {
                // The note we let go of was the one sounding.
                self.retrig = RETRIG_SAMPLES;
            }
            if let Some(top) = self.held.top() {
                self.last_note = top;
            } else {
                self.gate = false;
            }
        }

        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn parameters(&self) -> Option<&ParameterBank> {
        Some(&self.params)
    }

    fn parameters_mut(&mut self) -> Option<&mut ParameterBank> {
        Some(&mut self.params)
    }
}
