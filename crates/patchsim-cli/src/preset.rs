//! Preset file format for simulation runs.
//!
//! Presets are TOML files bundling a patch choice with parameter values and
//! a note schedule, so a whole run can be reproduced from one file.

use serde::Deserialize;
use std::collections::HashMap;

/// Preset file format.
#[derive(Debug, Deserialize)]
pub struct Preset {
    /// Name of the preset
    pub name: String,
    /// Optional description
    #[serde(default)]
    #[allow(dead_code)]
    pub description: Option<String>,
    /// Patch to instantiate
    pub patch: String,
    /// Sample rate for the run
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Parameter slot values, keyed by slot name (e.g. "A", "BC")
    #[serde(default)]
    pub params: HashMap<String, f32>,
    /// Note specifications in the `--note` grammar
    #[serde(default)]
    pub notes: Vec<String>,
}

fn default_sample_rate() -> u32 {
    44100
}
