//! Patchsim Core - shared types for simulating embedded audio patches
//!
//! This crate defines the narrow boundary between a patch (the audio program
//! under simulation) and the host driving it. A host constructs a patch,
//! feeds it MIDI-style control messages, and asks it to fill stereo audio
//! blocks; nothing else crosses the seam.
//!
//! # Core Abstractions
//!
//! ## Patch capability
//!
//! - [`Patch`] - Object-safe trait every simulated patch implements
//! - [`PatchError`] - Fatal processing failure reported by a patch
//!
//! ## Control messages
//!
//! - [`MidiMessage`] - 4-byte note-on/note-off style message with explicit
//!   named byte fields and masking constructors
//!
//! ## Audio
//!
//! - [`AudioBlock`] - Fixed-capacity dual-channel float buffer, one render
//!   block at a time
//!
//! ## Parameters
//!
//! - [`ParameterBank`] - The patch-side store behind knob-style parameters
//! - [`ParameterId`] - Device parameter slots (A..H, AA..DH)
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! patchsim-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Explicit layout**: messages are plain structs with named byte fields
//!   and encode/decode methods, never memory aliasing tricks
//! - **No reallocation**: an [`AudioBlock`] is sized once and reused for
//!   every render step
//! - **Object-safe seam**: the host depends on `dyn Patch` only, so patch
//!   implementations stay pluggable

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod block;
pub mod midi;
pub mod param;
pub mod patch;
pub mod tuning;

pub use block::AudioBlock;
pub use midi::{GROUP_NOTE_OFF, GROUP_NOTE_ON, MidiMessage, STATUS_NOTE_OFF, STATUS_NOTE_ON};
pub use param::{ParameterBank, ParameterId};
pub use patch::{Patch, PatchError};
pub use tuning::{CONCERT_A, MIDDLE_C, midi_to_freq};
