//! Patchsim Patches - built-in patch implementations
//!
//! Concrete audio programs behind the [`patchsim_core::Patch`] capability
//! trait. Each patch is constructed with an explicit sample rate and owns
//! all of its state; the host only ever sees the trait.
//!
//! # Patches
//!
//! - [`SilencePatch`] - writes silence; useful as a low-load default
//! - [`SquarePatch`] - CV/gate square synth driven by a held-note stack
//! - [`Saw4Patch`] - four detunable saw oscillators with phase offsets
//! - [`DelayPatch`] - pure one-second echo over a four-second history
//!
//! # Example
//!
//! ```rust
//! use patchsim_core::{AudioBlock, MidiMessage, Patch};
//! use patchsim_patches::SquarePatch;
//!
//! let mut patch = SquarePatch::new(44100.0);
//! patch.process_midi(MidiMessage::note_on(69, 0x7F)).unwrap();
//!
//! let mut block = AudioBlock::new(64);
//! patch.process_audio(&mut block).unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay;
pub mod note_stack;
pub mod saw4;
pub mod silence;
pub mod square;

pub use delay::DelayPatch;
pub use note_stack::{MAX_HELD, NoteStack};
pub use saw4::Saw4Patch;
pub use silence::SilencePatch;
pub use square::SquarePatch;
