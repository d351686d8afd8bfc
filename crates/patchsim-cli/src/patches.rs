//! Patch factory and registry.

use patchsim_core::Patch;
use patchsim_patches::{DelayPatch, Saw4Patch, SilencePatch, SquarePatch};

/// Error type for patch creation.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// The requested patch name is not in the registry.
    #[error("Unknown patch: {0}")]
    UnknownPatch(String),
}

/// Information about an available patch.
#[derive(Debug, Clone)]
pub struct PatchInfo {
    /// Registry name, as accepted by `--patch`.
    pub name: &'static str,
    /// One-line description for listings.
    pub description: &'static str,
}

/// All patches the CLI can instantiate.
pub fn available_patches() -> &'static [PatchInfo] {
    &[
        PatchInfo {
            name: "silence",
            description: "Writes silence; the low-load default",
        },
        PatchInfo {
            name: "square",
            description: "CV/gate square synth driven by held MIDI notes",
        },
        PatchInfo {
            name: "saw4",
            description: "Four detunable saw oscillators with phase offsets",
        },
        PatchInfo {
            name: "delay",
            description: "Pure one-second echo over a four-second history",
        },
    ]
}

/// Instantiates a patch by registry name at the given sample rate.
pub fn create_patch(name: &str, sample_rate: f32) -> Result<Box<dyn Patch>, FactoryError> {
    match name.to_ascii_lowercase().as_str() {
        "silence" => Ok(Box::new(SilencePatch::new(sample_rate))),
        "square" => Ok(Box::new(SquarePatch::new(sample_rate))),
        "saw4" => Ok(Box::new(Saw4Patch::new(sample_rate))),
        "delay" => Ok(Box::new(DelayPatch::new(sample_rate))),
        _ => Err(FactoryError::UnknownPatch(name.to_string())),
    }
}
