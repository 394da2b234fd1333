//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::AppContext;
use crate::commands;

/// Provision cloud VMs and register them as self-hosted pipeline agents
#[derive(Parser)]
#[command(
    name = "poolhand",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a VM and register it as an agent in a pool
    Provision(commands::provision::ProvisionArgs),

    /// Manage operator defaults
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli { json, quiet, no_color, command } = self;
        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
            Command::Provision(args) => {
                let app = AppContext::new(no_color, quiet, json);
                commands::provision::run(&args, &app).await
            }
            Command::Config(cmd) => {
                let ctx = crate::output::OutputContext::new(no_color, quiet);
                commands::config::run(&ctx, &crate::infra::config::YamlConfigStore, cmd)
            }
        }
    }
}
