//! Timed event schedules.

use crate::{Error, Result};
use patchsim_core::MidiMessage;

/// A control message scheduled for delivery at a sample offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedEvent {
    /// Sample offset at which the event becomes due.
    pub offset: u64,
    /// The message to deliver.
    pub message: MidiMessage,
}

/// An immutable, time-ordered sequence of [`TimedEvent`]s.
///
/// Built once before rendering; consumption is tracked by the render
/// session's cursor, not by the schedule itself, so one schedule can back
/// any number of runs.
#[derive(Clone, Debug, Default)]
pub struct EventSchedule {
    events: Vec<TimedEvent>,
}

impl EventSchedule {
    /// Builds a schedule from note specification strings.
    ///
    /// Each specification takes one of three forms:
    ///
    /// - `"69"` — note-on for note 69 at offset 0
    /// - `"100:69"` — note-on for note 69 at sample offset 100
    /// - `"200:69:0"` — explicit on/off: a nonzero flag schedules a
    ///   note-on, zero a note-off
    ///
    /// Note values are masked to 7 bits. A specification with more than
    /// three fields, or with a non-numeric field, is a fatal configuration
    /// error; no partial schedule is ever produced.
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        let events = specs
            .iter()
            .map(|spec| parse_spec(spec.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_events(events))
    }

    /// Builds a schedule from already-constructed events.
    ///
    /// Events are ordered by offset; equal offsets keep their input order.
    pub fn from_events(mut events: Vec<TimedEvent>) -> Self {
        events.sort_by_key(|event| event.offset);
        Self { events }
    }

    /// The ordered events.
    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    /// Number of scheduled events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The event at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&TimedEvent> {
        self.events.get(index)
    }
}

fn bad_spec(spec: &str, reason: impl Into<String>) -> Error {
    Error::EventSpec {
        spec: spec.to_string(),
        reason: reason.into(),
    }
}

fn parse_spec(spec: &str) -> Result<TimedEvent> {
    let fields: Vec<&str> = spec.split(':').collect();

    let (offset, note, on) = match fields.as_slice() {
        [note] => (0, parse_note(spec, note)?, true),
        [offset, note] => (parse_offset(spec, offset)?, parse_note(spec, note)?, true),
        [offset, note, flag] => (
            parse_offset(spec, offset)?,
            parse_note(spec, note)?,
            parse_flag(spec, flag)?,
        ),
        _ => return Err(bad_spec(spec, format!("expected at most 3 fields, got {}", fields.len()))),
    };

    let message = if on {
        MidiMessage::note_on(note, 0x7F)
    } else {
        MidiMessage::note_off(note)
    };

    Ok(TimedEvent { offset, message })
}

fn parse_offset(spec: &str, field: &str) -> Result<u64> {
    field
        .trim()
        .parse()
        .map_err(|_| bad_spec(spec, format!("offset '{field}' is not a non-negative integer")))
}

fn parse_note(spec: &str, field: &str) -> Result<u8> {
    field
        .trim()
        .parse()
        .map_err(|_| bad_spec(spec, format!("note '{field}' is not an integer in 0-255")))
}

fn parse_flag(spec: &str, field: &str) -> Result<bool> {
    let flag: i64 = field
        .trim()
        .parse()
        .map_err(|_| bad_spec(spec, format!("on/off flag '{field}' is not an integer")))?;
    Ok(flag != 0)
}
