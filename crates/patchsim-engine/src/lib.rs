//! Patchsim Engine - the offline render pipeline
//!
//! This crate drives a patch through a deterministic simulated run:
//!
//! - **Event scheduling**: [`EventSchedule`] parses note specifications into
//!   a time-ordered sequence of [`TimedEvent`]s
//! - **Rendering**: [`Renderer`] partitions the requested sample count into
//!   fixed-size blocks, interleaving event delivery with audio generation
//! - **Serialization**: [`SampleSink`] streams the produced samples as raw
//!   floats or human-readable text
//!
//! ## Quick Start
//!
//! ```rust
//! use patchsim_engine::{EventSchedule, OutputFormat, RenderConfig, Renderer, SampleSink};
//! use patchsim_patches::SquarePatch;
//!
//! let schedule = EventSchedule::parse(&["69", "2000:69:0"])?;
//! let config = RenderConfig {
//!     total_samples: 4096,
//!     ..RenderConfig::default()
//! };
//!
//! let mut patch = SquarePatch::new(config.sample_rate);
//! let mut sink = SampleSink::new(Vec::new(), OutputFormat::Binary);
//!
//! let stats = Renderer::new(config).run(&mut patch, &schedule, &mut sink)?;
//! assert_eq!(stats.samples, 4096);
//! # Ok::<(), patchsim_engine::Error>(())
//! ```

mod render;
mod schedule;
mod sink;

pub use render::{BLOCK_CAPACITY, RenderConfig, RenderStats, Renderer};
pub use schedule::{EventSchedule, TimedEvent};
pub use sink::{OutputFormat, SampleSink};

/// Error types for schedule building and rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A malformed event specification string. Surfaced before any
    /// rendering begins.
    #[error("bad event spec '{spec}': {reason}")]
    EventSpec {
        /// The offending specification as given.
        spec: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The patch failed during processing; the run is aborted.
    #[error("patch error: {0}")]
    Patch(#[from] patchsim_core::PatchError),

    /// The output stream became unwritable; the run is aborted.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
