//! Note-to-frequency conversion.

/// MIDI note number of middle C.
pub const MIDDLE_C: u8 = 60;

/// MIDI note number of concert A (440 Hz).
pub const CONCERT_A: u8 = 69;

/// Converts a MIDI note number to its equal-temperament frequency in Hz.
///
/// Note 69 maps to 440 Hz; each semitone is a factor of 2^(1/12).
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * libm::exp2f((f32::from(note) - f32::from(CONCERT_A)) / 12.0)
}
