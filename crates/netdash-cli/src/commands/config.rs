//! Config command implementation.

use anyhow::Result;
use netdash_views::config::CONFIG_KEYS;
use netdash_views::DashboardConfig;

/// Show current configuration.
pub fn show(config: &DashboardConfig) -> Result<()> {
    println!("netdash Configuration");
    println!("{:-<40}", "");

    for key in CONFIG_KEYS {
        let value = config.get(key)?.unwrap_or_else(|| "(not set)".to_string());
        println!("{:<24}{}", format!("{key}:"), value);
    }

    println!();
    println!("Labour:        {}", config.labour_path().display());
    println!("Collaboration: {}", config.collaboration_path().display());
    println!("Centrality:    {}", config.centrality_table_path().display());
    match config.flow_path() {
        Some(path) => println!("Flow:          {}", path.display()),
        None => println!("Flow:          (disabled)"),
    }
    match config.genre_table_path() {
        Some(path) => println!("Genres:        {}", path.display()),
        None => println!("Genres:        (disabled)"),
    }

    if let Some(config_path) = DashboardConfig::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value and save.
pub fn set(config: &mut DashboardConfig, key: &str, value: &str) -> Result<()> {
    config.set(key, value)?;
    config.save()?;
    if value.is_empty() {
        println!("Cleared {key}");
    } else {
        println!("Set {key} to: {value}");
    }
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &DashboardConfig, key: &str) -> Result<()> {
    let value = config.get(key)?.unwrap_or_else(|| "(not set)".to_string());
    println!("{value}");
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    DashboardConfig::default().save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
