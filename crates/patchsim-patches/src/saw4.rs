//! Four detunable saw oscillators with per-oscillator phase offsets.

use patchsim_core::{
    AudioBlock, CONCERT_A, MidiMessage, ParameterBank, ParameterId, Patch, PatchError,
};

const OSC_COUNT: usize = 4;

const SEMITONE_NAMES: [&str; OSC_COUNT] =
    ["Semitone A", "Semitone B", "Semitone C", "Semitone D"];
const MICROTONE_NAMES: [&str; OSC_COUNT] =
    ["Microtone A", "Microtone B", "Microtone C", "Microtone D"];
const PHASE_NAMES: [&str; OSC_COUNT] = ["Phase A", "Phase B", "Phase C", "Phase D"];
const WAVE_NAMES: [&str; OSC_COUNT] = ["Wave A>", "Wave B>", "Wave C>", "Wave D>"];

/// Wraps a phase value into [-1, 1).
fn wrap11(value: f64) -> f64 {
    libm::fmod(value + 1.0, 2.0) - 1.0
}

/// Maps a 0..1 knob value to a whole semitone offset in [-32, 32].
fn offset_to_semitones(value: f32) -> f32 {
    libm::roundf((value - 0.5) * 64.0)
}

/// Quad-saw drone voice.
///
/// Each oscillator has semitone, microtone and phase-offset controls; the
/// patch adds a base-pitch control, an overdrive gain and two mix-down
/// switches that fade out oscillators B-D and C-D. Output is the clamped
/// sum, written identically to both channels. The `Wave *>` slots are
/// outputs: each processing pass writes the oscillator phases back so a
/// host can observe them.
pub struct Saw4Patch {
    sample_rate: f32,
    params: ParameterBank,
    /// Base MIDI note; retuned by note-on messages.
    note: u8,
    phase: [f64; OSC_COUNT],
    semitone: [ParameterId; OSC_COUNT],
    microtone: [ParameterId; OSC_COUNT],
    phase_offset: [ParameterId; OSC_COUNT],
    wave_out: [ParameterId; OSC_COUNT],
    base: ParameterId,
    overdrive: ParameterId,
    mix: [ParameterId; 2],
}

impl Saw4Patch {
    /// Creates the patch at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        let mut params = ParameterBank::new();

        let slot = |index: usize| ParameterId::from_index(index).expect("slot in range");

        let mut semitone = [ParameterId::A; OSC_COUNT];
        let mut microtone = [ParameterId::A; OSC_COUNT];
        let mut phase_offset = [ParameterId::A; OSC_COUNT];
        let mut wave_out = [ParameterId::A; OSC_COUNT];

        for osc in 0..OSC_COUNT {
            let base = osc * 4;

            semitone[osc] = slot(base);
            params.register(semitone[osc], SEMITONE_NAMES[osc]);
            params.set(semitone[osc], 0.5);

            microtone[osc] = slot(base + 1);
            params.register(microtone[osc], MICROTONE_NAMES[osc]);
            params.set(microtone[osc], 0.5);

            phase_offset[osc] = slot(base + 2);
            params.register(phase_offset[osc], PHASE_NAMES[osc]);

            wave_out[osc] = slot(base + 3);
            params.register(wave_out[osc], WAVE_NAMES[osc]);
        }

        let base = slot(16);
        params.register(base, "Base Semi");
        params.set(base, 0.5);

        let overdrive = slot(17);
        params.register(overdrive, "Overdrive");

        let mix = [slot(18), slot(19)];
        params.register(mix[0], "Mix- BCD");
        params.set(mix[0], 1.0);
        params.register(mix[1], "Mix- CD");
        params.set(mix[1], 1.0);

        Self {
            sample_rate,
            params,
            note: 64,
            phase: [0.0; OSC_COUNT],
            semitone,
            microtone,
            phase_offset,
            wave_out,
            base,
            overdrive,
            mix,
        }
    }
}

impl Patch for Saw4Patch {
    fn process_audio(&mut self, block: &mut AudioBlock) -> Result<(), PatchError> {
        // Parameters for the entire pass
        let base = f32::from(self.note) + offset_to_semitones(self.params.get(self.base));
        let overdrive = (1.0 + self.params.get(self.overdrive) * 32.0) / 4.0;
        let nyquist = self.sample_rate / 2.0;

        let mix_bcd = self.params.get(self.mix[0]);
        let mix_cd = self.params.get(self.mix[1]);

        let mut step = [0.0f64; OSC_COUNT];
        let mut offset = [0.0f64; OSC_COUNT];
        let mut mix = [0.0f32; OSC_COUNT];

        for osc in 0..OSC_COUNT {
            let semitone = offset_to_semitones(self.params.get(self.semitone[osc]));
            let microtone = self.params.get(self.microtone[osc]) - 0.5;
            offset[osc] = f64::from(self.params.get(self.phase_offset[osc]));

            mix[osc] = 1.0;
            if osc > 0 {
                mix[osc] *= mix_bcd;
            }
            if osc > 1 {
                mix[osc] *= mix_cd;
            }

            // Power-of-two offset from concert A
            let tone = (base + semitone + microtone - f32::from(CONCERT_A)) / 12.0;
            step[osc] = f64::from(440.0 * libm::exp2f(tone) / nyquist);
        }

        let (left, right) = block.channels_mut();
        for i in 0..left.len() {
            let mut sample = 0.0f32;
            for osc in 0..OSC_COUNT {
                self.phase[osc] = wrap11(self.phase[osc] + step[osc]);
                let value = wrap11(self.phase[osc] + offset[osc]) as f32;
                sample += value * overdrive * mix[osc];
            }
            sample = sample.clamp(-1.0, 1.0);
            left[i] = sample;
            right[i] = sample;
        }

        for osc in 0..OSC_COUNT {
            self.params.set(self.wave_out[osc], self.phase[osc] as f32);
        }

        Ok(())
    }

    fn process_midi(&mut self, message: MidiMessage) -> Result<(), PatchError> {
        if message.is_note_on() {
            self.note = message.note();
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
