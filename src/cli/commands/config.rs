//! Config command handler

use crate::args::ConfigSubcommand;
use grad_planner::config::Config;
use std::io::{self, Write};

const KEYS: &str = "level, file, verbose, rules_file, reports_dir, min_credit, min_au, \
                    min_gpa, early_graduation_min_gpa, double_count_cap";

/// Dispatch config subcommands; exits with status 1 on failure
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None => {
            handle_config_get(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            handle_config_get(config, key);
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    };

    if let Err(e) = result {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

/// Print one value, or the whole configuration
pub fn handle_config_get(config: &Config, key: Option<String>) {
    match key {
        Some(k) => match config.get(&k) {
            Some(value) => println!("{value}"),
            None => eprintln!("Unknown config key: '{k}' (known keys: {KEYS})"),
        },
        None => {
            println!("\n=== Configuration ({}) ===\n", Config::get_config_file_path().display());
            print!("{config}");
        }
    }
}

/// Set a value and persist
///
/// # Errors
/// Returns a message if the key or value is invalid or the file cannot be saved
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

/// Restore a value to its default and persist
///
/// # Errors
/// Returns a message if the key is unknown or the file cannot be saved
pub fn handle_config_unset(
    config: &mut Config,
    defaults: &Config,
    key: &str,
) -> Result<(), String> {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Reset {key} to default");
    Ok(())
}

/// Delete the config file after interactive confirmation
///
/// # Errors
/// Returns a message if the file exists but cannot be removed
pub fn handle_config_reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
