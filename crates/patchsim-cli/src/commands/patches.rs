//! Patch listing and information command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use crate::patches::{available_patches, create_patch};
use clap::Args;

#[derive(Args)]
pub struct PatchesArgs {
    /// Show details for a specific patch
    #[arg(value_name = "PATCH")]
    patch: Option<String>,
}

pub fn run(args: PatchesArgs) -> anyhow::Result<()> {
    let patches = available_patches();

    if let Some(patch_name) = &args.patch {
        let info = patches
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(patch_name))
            .ok_or_else(|| anyhow::anyhow!("Unknown patch: {}", patch_name))?;

        println!("{}", info.name);
        println!("{}", "=".repeat(info.name.len()));
        println!();
        println!("{}", info.description);
        println!();

        // Instantiate to read the registered parameter slots.
        let patch = create_patch(info.name, 44100.0)?;
        match patch.parameters() {
            Some(bank) if bank.registered_count() > 0 => {
                println!("Parameters:");
                println!();
                println!("  {:6}  {:24}  {}", "Slot", "Name", "Default");
                println!("  {:6}  {:24}  {}", "----", "----", "-------");
                for (id, name, value) in bank.registered() {
                    println!("  {:6}  {:24}  {:.2}", id.to_string(), name, value);
                }
                println!();
                println!("Example usage:");
                println!();
                let (id, _, value) = bank.registered().next().expect("non-empty bank");
                println!(
                    "  patchsim run --patch {} --note 69 --param {}={:.1}",
                    info.name, id, value
                );
            }
            _ => {
                println!("No parameters.");
                println!();
                println!("Example usage:");
                println!();
                println!("  patchsim run --patch {} --samples 44100", info.name);
            }
        }
    } else {
        println!("Available Patches");
        println!("=================");
        println!();
        for info in patches {
            println!("  {:10}  {}", info.name, info.description);
        }
        println!();
        println!("Use `patchsim patches <name>` for parameter details.");
    }

    Ok(())
}
