//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use nutri_core::models::config::NutriConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the active configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "parser.unresolved_default")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args.output.unwrap_or(path), init_args.force),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nutri")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<NutriConfig> {
    match config_path {
        Some(path) => {
            debug!("Loading config from {}", path);
            Ok(NutriConfig::from_file(Path::new(path))?)
        }
        None => load_or_default(&default_config_path()),
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<NutriConfig> {
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(NutriConfig::from_file(path)?)
    } else {
        debug!("No config at {}, using defaults", path.display());
        Ok(NutriConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!("{} {} not found, showing defaults", style("ℹ").blue(), path.display());
    }
    let config = load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    NutriConfig::default().save(&path)?;
    eprintln!("{} Wrote default parser settings to {}", style("✓").green(), path.display());
    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;

    let value = key
        .split('.')
        .try_fold(&json, |current, part| current.get(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", value);
    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;

    // Unquoted words ("true", "0.25") are JSON; anything else is a string.
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let json = set_json_path(serde_json::to_value(&config)?, key, parsed_value.clone())?;
    let config: NutriConfig = serde_json::from_value(json)?;
    config.parser.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    eprintln!("{} {} = {}", style("✓").green(), key, parsed_value);
    Ok(())
}

/// Replace the value at a dotted path; every segment must already exist.
fn set_json_path(
    mut json: serde_json::Value,
    key: &str,
    value: serde_json::Value,
) -> anyhow::Result<serde_json::Value> {
    let mut current = &mut json;

    for part in key.split('.') {
        current = current
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    }
    *current = value;

    Ok(json)
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    let status = if path.exists() {
        style("exists").green()
    } else {
        style("not created, run 'nutri config init'").yellow()
    };
    println!("{} ({})", path.display(), status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_json_path() {
        let json = serde_json::to_value(NutriConfig::default()).unwrap();
        let json = set_json_path(json, "parser.auto_correct", json!(false)).unwrap();

        let config: NutriConfig = serde_json::from_value(json).unwrap();
        assert!(!config.parser.auto_correct);
    }

    #[test]
    fn test_set_json_path_unknown_key() {
        let json = serde_json::to_value(NutriConfig::default()).unwrap();
        assert!(set_json_path(json, "parser.missing", json!(1)).is_err());
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nutri.json");
        fs::write(&path, r#"{"output": {"precision": 2}}"#).unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.output.precision, 2);
        assert_eq!(config.parser.unresolved_default, 1.0);
    }
}
