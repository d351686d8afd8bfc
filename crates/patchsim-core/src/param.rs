//! Knob-style patch parameters.
//!
//! Parameter slots mirror the control surface of the simulated device: eight
//! primary knobs `A`..`H` followed by four banks of eight (`AA`..`AH` through
//! `DA`..`DH`), forty slots in all. A patch registers the slots it uses with
//! a display name; the host may then read and write them by id.

#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

/// Number of addressable parameter slots.
pub const PARAMETER_SLOTS: usize = 40;

/// A device parameter slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParameterId(u8);

impl ParameterId {
    /// Primary knob A.
    pub const A: Self = Self(0);
    /// Primary knob B.
    pub const B: Self = Self(1);
    /// Primary knob C.
    pub const C: Self = Self(2);
    /// Primary knob D.
    pub const D: Self = Self(3);
    /// Primary knob E.
    pub const E: Self = Self(4);
    /// Primary knob F.
    pub const F: Self = Self(5);
    /// Primary knob G.
    pub const G: Self = Self(6);
    /// Primary knob H.
    pub const H: Self = Self(7);

    /// Builds an id from a raw slot index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < PARAMETER_SLOTS).then(|| Self(index as u8))
    }

    /// The raw slot index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The id `steps` slots after this one, if in range.
    pub fn offset(self, steps: usize) -> Option<Self> {
        Self::from_index(self.index() + steps)
    }

    /// Parses a slot name: `"A"`..`"H"` or a bank pair `"AA"`..`"DH"`.
    ///
    /// Matching is case-insensitive. Returns `None` for anything that is not
    /// a valid slot name.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars().map(|c| c.to_ascii_uppercase());
        let first = chars.next()?;
        let second = chars.next();
        if chars.next().is_some() {
            return None;
        }
        match second {
            None => match first {
                'A'..='H' => Some(Self(first as u8 - b'A')),
                _ => None,
            },
            Some(second) => {
                let bank = match first {
                    'A'..='D' => first as u8 - b'A',
                    _ => return None,
                };
                let slot = match second {
                    'A'..='H' => second as u8 - b'A',
                    _ => return None,
                };
                Some(Self(8 + bank * 8 + slot))
            }
        }
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 8 {
            write!(f, "{}", (b'A' + self.0) as char)
        } else {
            let bank = (self.0 - 8) / 8;
            let slot = (self.0 - 8) % 8;
            write!(f, "{}{}", (b'A' + bank) as char, (b'A' + slot) as char)
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    name: Option<String>,
    value: f32,
}

/// Dense per-patch parameter store.
///
/// Registering a slot gives it a display name; reading an unregistered slot
/// yields 0.0. The bank grows on demand and never shrinks.
#[derive(Clone, Debug, Default)]
pub struct ParameterBank {
    slots: Vec<Slot>,
}

impl ParameterBank {
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    fn grow_to(&mut self, id: ParameterId) {
        if self.slots.len() <= id.index() {
            self.slots.resize_with(id.index() + 1, Slot::default);
        }
    }

    /// Registers a slot under a display name, keeping any current value.
    pub fn register(&mut self, id: ParameterId, name: impl Into<String>) {
        self.grow_to(id);
        self.slots[id.index()].name = Some(name.into());
    }

    /// Reads a slot value; unregistered slots read as 0.0.
    pub fn get(&self, id: ParameterId) -> f32 {
        self.slots.get(id.index()).map_or(0.0, |slot| slot.value)
    }

    /// Writes a slot value, growing the bank if needed.
    pub fn set(&mut self, id: ParameterId, value: f32) {
        self.grow_to(id);
        self.slots[id.index()].value = value;
    }

    /// Iterates over registered slots as `(id, name, value)`.
    pub fn registered(&self) -> impl Iterator<Item = (ParameterId, &str, f32)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let id = ParameterId::from_index(index)?;
            slot.name.as_deref().map(|name| (id, name, slot.value))
        })
    }

    /// Number of registered slots.
    pub fn registered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.name.is_some()).count()
    }
}
