//! `config` command: manage the settings file.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::json;

use rdr_core::{SettingsStore, mask_secret};

use crate::output::{JsonRenderer, Outcome};

/// Arguments for the config command.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Set a configuration value.
    Set { key: String, value: String },

    /// Get a configuration value.
    Get { key: String },

    /// List all configuration values.
    List,

    /// Show the config file path.
    Path,
}

pub fn run(args: ConfigArgs) -> Result<Outcome> {
    let store = SettingsStore::default_location()?;
    let mut renderer = JsonRenderer::new();

    match args.action {
        ConfigAction::Set { key, value } => match store.set(&key, &value) {
            Ok(()) => {
                // Never echo a key back raw, not even the one just typed.
                let display = if key.replace('-', "_") == "api_key" {
                    mask_secret(&value)
                } else {
                    value
                };
                renderer.render(&json!({"key": key, "value": display}))?;
                Ok(Outcome::Success)
            }
            Err(err) => {
                renderer.render_error(&err.to_string())?;
                Ok(Outcome::Failure)
            }
        },

        ConfigAction::Get { key } => match store.get(&key) {
            Ok(value) if value.is_empty() => {
                println!("(not set)");
                Ok(Outcome::Success)
            }
            Ok(value) => {
                println!("{value}");
                Ok(Outcome::Success)
            }
            Err(err) => {
                renderer.render_error(&err.to_string())?;
                Ok(Outcome::Failure)
            }
        },

        ConfigAction::List => match store.list() {
            Ok(entries) => {
                for (key, value) in entries {
                    println!("{key:<25} : {value}");
                }
                println!();
                println!("Config file: {}", store.path().display());
                Ok(Outcome::Success)
            }
            Err(err) => {
                renderer.render_error(&err.to_string())?;
                Ok(Outcome::Failure)
            }
        },

        ConfigAction::Path => {
            let path = store.path();
            renderer.render(&json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
            }))?;
            Ok(Outcome::Success)
        }
    }
}
