//! `poolhand provision` — create a VM and register it as a pool agent.
//!
//! This is the boundary: credentials are resolved here (never inside the
//! orchestrator), CLI flags / environment / config-file defaults are merged
//! into one immutable `ProvisionOptions`, and the result is rendered for the
//! operator.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::provision as service;
use crate::domain::config::OperatorConfig;
use crate::domain::provision::{
    Platform, ProvisionOptions, ProvisionRequest, ProvisionResult, Secrets,
};
use crate::infra::credentials::CredentialResolver;
use crate::infra::installer::EmbeddedInstallers;
use crate::output::{TerminalReporter, json};

/// Arguments for the provision command.
#[derive(Args)]
pub struct ProvisionArgs {
    /// Organization URL, e.g. https://dev.azure.com/contoso
    #[arg(long)]
    pub organization_url: String,

    /// Pool the agent registers into
    #[arg(long)]
    pub pool: String,

    /// Resource group to create or reuse
    #[arg(long)]
    pub resource_group: String,

    /// Region (falls back to defaults.location, then eastus)
    #[arg(long)]
    pub location: Option<String>,

    /// VM name, unique within the resource group
    #[arg(long)]
    pub vm_name: String,

    /// Agent name as shown in the pool (defaults to the VM name)
    #[arg(long)]
    pub agent_name: Option<String>,

    /// Target platform
    #[arg(long, value_parser = ["linux", "windows"], default_value = "linux")]
    pub platform: String,

    /// VM size (falls back to defaults.vm-size)
    #[arg(long)]
    pub vm_size: Option<String>,

    /// Image alias or URN
    #[arg(long)]
    pub image: Option<String>,

    /// Administrator account name (falls back to defaults.admin-username)
    #[arg(long)]
    pub admin_username: Option<String>,

    /// Existing virtual network to attach to
    #[arg(long)]
    pub vnet_name: Option<String>,

    /// Subnet within --vnet-name
    #[arg(long)]
    pub subnet_name: Option<String>,

    /// Attach a public IP address ("true" or "false")
    #[arg(long, default_value = "true")]
    pub public_ip: String,

    /// Extra data disk size in GiB
    #[arg(long)]
    pub data_disk_gb: Option<u32>,

    /// Agent package version
    #[arg(long, env = "AZP_AGENT_VERSION")]
    pub agent_version: Option<String>,

    /// Agent installation directory on the VM
    #[arg(long, env = "AZP_INSTALL_HOME")]
    pub install_home: Option<String>,

    /// Agent working-directory name
    #[arg(long, env = "AZP_WORK_DIR")]
    pub work_dir: Option<String>,

    /// key=value tag for the resource group and VM (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Read installer scripts from this directory instead of the built-in copies
    #[arg(long)]
    pub installer_dir: Option<PathBuf>,
}

/// Run `poolhand provision`.
///
/// # Errors
///
/// Returns an error if credential resolution, validation, or any
/// provisioning step fails.
pub async fn run(args: &ProvisionArgs, app: &AppContext) -> Result<()> {
    let config = app.config.load()?;
    let platform = parse_platform(&args.platform);
    let request = build_request(args, &config, platform);
    let options = effective_options(args, &config, platform);

    let resolver = CredentialResolver::new(app.non_interactive);
    let access_token = resolver.resolve("AZP_TOKEN", "Access token")?;
    let admin_password = match platform {
        Platform::Windows => Some(resolver.resolve(
            "WIN_ADMIN_PASSWORD",
            "Windows administrator password",
        )?),
        Platform::Linux => None,
    };
    let secrets = Secrets {
        access_token,
        admin_password,
    };

    let installers = args.installer_dir.clone().map_or_else(
        EmbeddedInstallers::new,
        EmbeddedInstallers::with_override_dir,
    );
    let reporter = TerminalReporter::new(&app.output);

    match service::provision(&app.cloud, &installers, &reporter, &request, &options, &secrets).await
    {
        Ok(result) => {
            print_result(app, &request, &result)?;
            Ok(())
        }
        Err(err) => {
            if app.is_json() {
                println!("{}", json::format_error(&format!("{err:#}"), json::error_code(&err))?);
            }
            Err(err)
        }
    }
}

fn parse_platform(value: &str) -> Platform {
    // clap restricts the value to the two possible strings.
    if value == "windows" {
        Platform::Windows
    } else {
        Platform::Linux
    }
}

fn build_request(
    args: &ProvisionArgs,
    config: &OperatorConfig,
    platform: Platform,
) -> ProvisionRequest {
    ProvisionRequest {
        organization_url: args.organization_url.clone(),
        pool: args.pool.clone(),
        resource_group: args.resource_group.clone(),
        location: args
            .location
            .clone()
            .or_else(|| config.defaults.location.clone())
            .unwrap_or_else(|| "eastus".to_string()),
        vm_name: args.vm_name.clone(),
        agent_name: args.agent_name.clone().unwrap_or_else(|| args.vm_name.clone()),
        platform,
    }
}

/// Merge flag > config-file default > built-in default into the immutable
/// options value the orchestrator receives. Environment fallbacks are
/// declared on the clap args themselves.
fn effective_options(
    args: &ProvisionArgs,
    config: &OperatorConfig,
    platform: Platform,
) -> ProvisionOptions {
    let mut opts = ProvisionOptions::defaults(platform);
    if let Some(v) = args.vm_size.clone().or_else(|| config.defaults.vm_size.clone()) {
        opts.vm_size = v;
    }
    if let Some(v) = args.image.clone() {
        opts.image = v;
    }
    if let Some(v) = args
        .admin_username
        .clone()
        .or_else(|| config.defaults.admin_username.clone())
    {
        opts.admin_username = v;
    }
    opts.vnet_name = args.vnet_name.clone();
    opts.subnet_name = args.subnet_name.clone();
    opts.public_ip = args.public_ip.clone();
    opts.data_disk_gb = args.data_disk_gb;
    if let Some(v) = args.agent_version.clone() {
        opts.agent_version = v;
    }
    if let Some(v) = args.install_home.clone() {
        opts.install_home = v;
    }
    if let Some(v) = args.work_dir.clone() {
        opts.work_dir = v;
    }
    opts.tags = args.tags.clone();
    opts
}

fn print_result(app: &AppContext, request: &ProvisionRequest, result: &ProvisionResult) -> Result<()> {
    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    let ctx = &app.output;
    ctx.kv("Public IP", result.public_ip.as_deref().unwrap_or("-"));
    ctx.kv("Private IP", result.private_ip.as_deref().unwrap_or("-"));
    ctx.kv("Admin user", &result.admin_username);
    if request.platform == Platform::Linux
        && let Some(ip) = result.public_ip.as_deref()
    {
        ctx.kv("Connect", &format!("ssh {}@{ip}", result.admin_username));
    }
    if !result.remote_output.is_empty() {
        ctx.info("remote bootstrap output:");
        for line in result.remote_output.lines() {
            ctx.kv("", line);
        }
    }
    Ok(())
}
