//! `poolhand config` — read and write operator defaults.

use anyhow::Result;
use clap::Subcommand;

use crate::application::ports::ConfigStore;
use crate::domain::config::{validate_config_key, validate_config_value};
use crate::output::OutputContext;

/// Subcommands for managing operator defaults.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the value stored for a setting
    Get {
        /// Setting name, e.g. defaults.location
        key: String,
    },
    /// Store a default value
    Set {
        /// Setting name, e.g. defaults.location
        key: String,
        /// Value to store
        value: String,
    },
    /// Print the config file location
    Path,
}

/// Run `poolhand config`.
///
/// # Errors
///
/// Returns an error on an unknown key, an invalid value, or a store failure.
pub fn run(ctx: &OutputContext, store: &impl ConfigStore, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Get { key } => {
            validate_config_key(&key)?;
            let config = store.load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => println!("(unset)"),
            }
            Ok(())
        }
        ConfigCommand::Set { key, value } => {
            validate_config_key(&key)?;
            validate_config_value(&key, &value)?;
            let mut config = store.load()?;
            config.set(&key, value);
            store.save(&config)?;
            ctx.success(&format!("{key} updated"));
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", store.path()?.display());
            Ok(())
        }
    }
}
