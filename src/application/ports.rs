//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;

use anyhow::Result;

use crate::domain::config::OperatorConfig;
use crate::domain::provision::Platform;
use crate::domain::template::ScriptTemplate;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Creation parameters for a new VM instance.
pub struct VmSpec<'a> {
    pub resource_group: &'a str,
    pub name: &'a str,
    /// Image alias or URN, e.g. `"Ubuntu2204"`.
    pub image: &'a str,
    /// VM size, e.g. `"Standard_DS2_v2"`.
    pub size: &'a str,
    pub admin_username: &'a str,
    pub auth: VmAuth<'a>,
    /// Optional existing virtual network to attach to.
    pub vnet_name: Option<&'a str>,
    /// Optional subnet within `vnet_name`.
    pub subnet_name: Option<&'a str>,
    /// When `false`, the VM is created without a public address.
    pub public_ip: bool,
    /// Optional extra data disk, in GiB.
    pub data_disk_gb: Option<u32>,
    /// `key=value` tags.
    pub tags: &'a [String],
}

/// How the VM authenticates its administrator account.
pub enum VmAuth<'a> {
    /// Generate an SSH key pair on the client side (linux).
    SshKeyPair,
    /// Administrator password (windows).
    Password(&'a str),
}

/// Which remote execution engine runs the bootstrap script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEngine {
    /// POSIX shell interpreter.
    Shell,
    /// PowerShell script interpreter.
    PowerShell,
}

impl CommandEngine {
    /// The engine for a target platform.
    #[must_use]
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Linux => Self::Shell,
            Platform::Windows => Self::PowerShell,
        }
    }
}

// ── Cloud Port Traits ─────────────────────────────────────────────────────────

/// Resource-group operations.
#[allow(async_fn_in_trait)]
pub trait ResourceGroups {
    /// Create the group or reuse it when one with the same name exists.
    async fn ensure_group(&self, name: &str, location: &str, tags: &[String]) -> Result<Output>;
}

/// VM lifecycle operations.
#[allow(async_fn_in_trait)]
pub trait VirtualMachines {
    /// Create a VM; idempotent-by-name within its resource group.
    async fn create_vm(&self, spec: &VmSpec<'_>) -> Result<Output>;
    /// Block until the cloud reports the VM as created.
    async fn wait_created(&self, resource_group: &str, name: &str) -> Result<Output>;
}

/// Out-of-band script execution on a running VM.
#[allow(async_fn_in_trait)]
pub trait RemoteCommands {
    /// Run a script on the VM, blocking until the remote side finishes.
    async fn invoke(
        &self,
        resource_group: &str,
        name: &str,
        engine: CommandEngine,
        script: &str,
    ) -> Result<Output>;
}

/// Composite trait — any type implementing all three sub-traits is a
/// `CloudProvisioner`.
pub trait CloudProvisioner: ResourceGroups + VirtualMachines + RemoteCommands {}

impl<T> CloudProvisioner for T where T: ResourceGroups + VirtualMachines + RemoteCommands {}

// ── Installer Source Port ─────────────────────────────────────────────────────

/// Supplies the companion installer script and the bootstrap template for a
/// platform. Sync trait — reads embedded or local files only.
pub trait InstallerSource {
    /// Raw bytes of the agent installer script.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::PrerequisiteMissing` when the script is
    /// absent from the expected location.
    fn installer(&self, platform: Platform) -> Result<Vec<u8>>;

    /// The bootstrap template the installer payload is embedded into.
    fn bootstrap_template(&self, platform: Platform) -> Result<ScriptTemplate>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Store Port ─────────────────────────────────────────────────────────

/// Abstracts operator-default persistence (load/save/path).
pub trait ConfigStore {
    /// Load the config, returning defaults when no file exists.
    fn load(&self) -> Result<OperatorConfig>;
    /// Persist the config.
    fn save(&self, config: &OperatorConfig) -> Result<()>;
    /// The path the config lives at.
    fn path(&self) -> Result<PathBuf>;
}
