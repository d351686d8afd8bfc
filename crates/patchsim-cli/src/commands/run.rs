//! Offline render command.

use crate::patches::create_patch;
use crate::preset::Preset;
use anyhow::Context;
use clap::Args;
use patchsim_core::ParameterId;
use patchsim_engine::{
    BLOCK_CAPACITY, EventSchedule, OutputFormat, RenderConfig, Renderer, SampleSink,
};
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Patch to simulate (see `patchsim patches`)
    #[arg(short, long)]
    patch: Option<String>,

    /// Number of samples to render
    #[arg(short, long, default_value = "44100")]
    samples: u64,

    /// Sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Print human readable lines instead of raw float samples
    #[arg(long)]
    human: bool,

    /// Schedule a MIDI note: `69` for note 69 on at sample 0, `100:69` for
    /// note on at sample 100, `200:69:0` for note off at sample 200
    #[arg(short = 'n', long = "note")]
    notes: Vec<String>,

    /// Set a patch parameter by slot (e.g. "A=0.5")
    #[arg(long = "param", value_parser = parse_key_val, number_of_values = 1)]
    params: Vec<(String, String)>,

    /// Preset file (TOML) supplying patch, parameters and notes
    #[arg(long)]
    preset: Option<PathBuf>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid parameter format: '{}' (expected key=value)", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let preset = args
        .preset
        .as_ref()
        .map(|path| -> anyhow::Result<Preset> {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading preset {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("parsing preset {}", path.display()))
        })
        .transpose()?;

    let patch_name = args
        .patch
        .or_else(|| preset.as_ref().map(|p| p.patch.clone()))
        .unwrap_or_else(|| "silence".to_string());
    let sample_rate = args
        .sample_rate
        .or_else(|| preset.as_ref().map(|p| p.sample_rate))
        .unwrap_or(44100);

    // Configuration errors surface here, before any output is produced.
    let mut specs: Vec<String> = preset
        .as_ref()
        .map(|p| p.notes.clone())
        .unwrap_or_default();
    specs.extend(args.notes);
    let schedule = EventSchedule::parse(&specs)?;

    let mut patch = create_patch(&patch_name, sample_rate as f32)?;

    // Preset parameters first, command-line overrides after.
    let mut param_values: Vec<(String, f32)> = preset
        .as_ref()
        .map(|p| p.params.iter().map(|(k, v)| (k.clone(), *v)).collect())
        .unwrap_or_default();
    for (name, value) in &args.params {
        let value: f32 = value
            .parse()
            .with_context(|| format!("parameter '{name}' value '{value}' is not a number"))?;
        param_values.push((name.clone(), value));
    }

    if !param_values.is_empty() {
        let bank = patch
            .parameters_mut()
            .ok_or_else(|| anyhow::anyhow!("patch '{patch_name}' exposes no parameters"))?;
        for (name, value) in param_values {
            let id = ParameterId::from_name(&name)
                .ok_or_else(|| anyhow::anyhow!("unknown parameter slot '{name}'"))?;
            bank.set(id, value);
        }
    }

    tracing::debug!(
        patch = %patch_name,
        samples = args.samples,
        sample_rate,
        events = schedule.len(),
        "run configuration resolved"
    );

    // Status goes to stderr; stdout carries the samples.
    eprintln!(
        "Rendering {} samples of '{}' at {} Hz ({} scheduled events)...",
        args.samples,
        patch_name,
        sample_rate,
        schedule.len()
    );

    let format = if args.human {
        OutputFormat::Human
    } else {
        OutputFormat::Binary
    };

    let stdout = std::io::stdout().lock();
    let mut sink = SampleSink::new(BufWriter::new(stdout), format);

    let config = RenderConfig {
        total_samples: args.samples,
        block_capacity: BLOCK_CAPACITY,
        sample_rate: sample_rate as f32,
    };
    let stats = Renderer::new(config).run(patch.as_mut(), &schedule, &mut sink)?;

    eprintln!(
        "Wrote {} samples in {} blocks, {} event(s) delivered",
        stats.samples, stats.blocks, stats.events_delivered
    );

    Ok(())
}
