//! `info` command implementation.

use anyhow::{Context, Result};
use config_loader::{load_accessor_config, AccessorConfig};
use tracing::info;

use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(params = %args.params.display(), "Loading parameter info");

    let store = super::load_params(&args.params)?;
    let config = load_accessor_config(&store)
        .with_context(|| format!("Invalid parameters in {}", args.params.display()))?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize parameter info")?;
        println!("{}", json);
    } else {
        print_config_info(&config, store.keys().collect());
    }

    Ok(())
}

fn print_config_info(config: &AccessorConfig, keys: Vec<&str>) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Vehicle Model Configuration                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📦 Model");
    println!("   └─ Library: {}", config.lib_path.display());

    let entries = config.limits.entries();
    println!("\n📐 Kinematic Limits ({})", entries.len());
    for (i, (key, value)) in entries.iter().enumerate() {
        let prefix = if i == entries.len() - 1 { "└─" } else { "├─" };
        println!("   {} {:<28} {}", prefix, key, value);
    }

    // Backend parameters live outside the accessor's own keys
    let extra: Vec<&str> = keys
        .into_iter()
        .filter(|key| {
            *key != contracts::VEHICLE_MODEL_LIB_PATH_KEY
                && !contracts::KinematicLimits::PARAM_KEYS.contains(key)
        })
        .collect();
    if !extra.is_empty() {
        println!("\n🔧 Other Parameters ({})", extra.len());
        for (i, key) in extra.iter().enumerate() {
            let prefix = if i == extra.len() - 1 { "└─" } else { "├─" };
            println!("   {} {}", prefix, key);
        }
    }

    println!();
}
