//! MIDI message encoding and decoding.
//!
//! Messages are modeled after the 4-byte USB-MIDI event packet: a
//! cable/command group nibble followed by a standard 3-byte channel voice
//! message. Everything here is an explicit named field with explicit
//! masking; the wire layout is reachable only through [`MidiMessage::to_bytes`]
//! and [`MidiMessage::from_bytes`].

/// Status nibble for note-off channel voice messages.
pub const STATUS_NOTE_OFF: u8 = 0x80;

/// Status nibble for note-on channel voice messages.
pub const STATUS_NOTE_ON: u8 = 0x90;

/// USB-MIDI group nibble framing a note-on message.
pub const GROUP_NOTE_ON: u8 = 0x09;

/// USB-MIDI group nibble framing a note-off message.
pub const GROUP_NOTE_OFF: u8 = 0x08;

/// Upper-nibble mask selecting the message kind from a status byte.
const STATUS_KIND_MASK: u8 = 0xF0;

/// Lower-nibble mask selecting the channel from a status byte.
const CHANNEL_MASK: u8 = 0x0F;

/// Mask applied to all 7-bit data values.
const DATA_MASK: u8 = 0x7F;

/// A 4-byte MIDI-style control message.
///
/// `status` packs a 4-bit message kind and a 4-bit channel; `data1` and
/// `data2` are 7-bit values. Out-of-range data values are silently truncated
/// to 7 bits on construction, never rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiMessage {
    /// Cable/command grouping nibble (9 for note-on framing, 8 for note-off).
    group: u8,
    /// Status byte: kind nibble | channel nibble.
    status: u8,
    /// First data byte (note number for note messages).
    data1: u8,
    /// Second data byte (velocity for note messages).
    data2: u8,
}

impl MidiMessage {
    /// Builds a message from raw parts, masking the data bytes to 7 bits.
    pub fn new(group: u8, status: u8, data1: u8, data2: u8) -> Self {
        Self {
            group,
            status,
            data1: data1 & DATA_MASK,
            data2: data2 & DATA_MASK,
        }
    }

    /// Builds a note-on for `note` (channel 0) at the given velocity.
    pub fn note_on(note: u8, velocity: u8) -> Self {
        Self::new(GROUP_NOTE_ON, STATUS_NOTE_ON, note, velocity)
    }

    /// Builds a note-off for `note` (channel 0), velocity 0.
    pub fn note_off(note: u8) -> Self {
        Self::new(GROUP_NOTE_OFF, STATUS_NOTE_OFF, note, 0)
    }

    /// Decodes a message from its 4-byte wire form.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Encodes the message into its 4-byte wire form.
    pub fn to_bytes(self) -> [u8; 4] {
        [self.group, self.status, self.data1, self.data2]
    }

    /// The cable/command grouping nibble.
    pub fn group(self) -> u8 {
        self.group
    }

    /// The message kind: the status byte with its channel nibble cleared.
    pub fn kind(self) -> u8 {
        self.status & STATUS_KIND_MASK
    }

    /// The channel nibble of the status byte.
    pub fn channel(self) -> u8 {
        self.status & CHANNEL_MASK
    }

    /// The note number of a note message.
    pub fn note(self) -> u8 {
        self.data1
    }

    /// The velocity of a note message.
    pub fn velocity(self) -> u8 {
        self.data2
    }

    /// True for a note-on with nonzero velocity.
    pub fn is_note_on(self) -> bool {
        self.kind() == STATUS_NOTE_ON && self.velocity() != 0
    }

    /// True for a note-off, or a note-on with velocity 0 (running-status
    /// convention for releasing a key).
    pub fn is_note_off(self) -> bool {
        self.kind() == STATUS_NOTE_OFF || (self.kind() == STATUS_NOTE_ON && self.velocity() == 0)
    }
}
