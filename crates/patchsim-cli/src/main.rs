//! Patchsim CLI - offline simulator for embedded audio patches.

mod commands;
mod patches;
mod preset;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "patchsim")]
#[command(author, version, about = "Offline simulator for embedded audio patches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a patch and stream its samples to stdout
    Run(commands::run::RunArgs),

    /// List available patches and their parameters
    Patches(commands::patches::PatchesArgs),
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout is reserved for rendered samples.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Patches(args) => commands::patches::run(args),
    }
}
