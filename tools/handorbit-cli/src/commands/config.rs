//! Show or save the effective configuration.

use std::path::PathBuf;

use handorbit_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, path: Option<PathBuf>, save: bool) -> anyhow::Result<()> {
    let shown = path.clone().unwrap_or_else(config_file_path);

    println!("Config file: {}", shown.display());
    println!("  Exists: {}", shown.exists());
    println!();
    println!("{}", serde_json::to_string_pretty(config)?);

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration is invalid: {e}"))?;

    if save {
        let saved = match path {
            Some(path) => config.save_to(&path).map(|()| path),
            None => config.save(),
        }
        .map_err(|e| anyhow::anyhow!("Failed to save config: {e}"))?;
        println!();
        println!("Saved to: {}", saved.display());
    }

    Ok(())
}
