//! Provisioning request, options, secrets, and result types.
//!
//! Everything here is a transient process-local value: constructed once at
//! the boundary, passed by reference into the orchestrator, never persisted.

use serde::Serialize;

use crate::domain::error::ProvisionError;

// ── Platform ─────────────────────────────────────────────────────────────────

/// Target platform of the VM being provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
}

impl Platform {
    /// Short lowercase name as accepted on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
        }
    }
}

// ── Request ──────────────────────────────────────────────────────────────────

/// What to provision and where to register it. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    /// Task-queue organization URL, e.g. `https://dev.azure.com/contoso`.
    pub organization_url: String,
    /// Named pool the agent registers into.
    pub pool: String,
    /// Resource group to create or reuse.
    pub resource_group: String,
    /// Cloud region, e.g. `eastus`.
    pub location: String,
    /// VM name, unique within the resource group.
    pub vm_name: String,
    /// Agent name as it appears in the pool.
    pub agent_name: String,
    pub platform: Platform,
}

// ── Options ──────────────────────────────────────────────────────────────────

/// Per-run overrides of the built-in defaults. Each field is independently
/// optional at the boundary; this struct holds the merged, effective values.
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    pub vm_size: String,
    pub image: String,
    pub admin_username: String,
    pub vnet_name: Option<String>,
    pub subnet_name: Option<String>,
    /// Raw public-IP flag. Strictly `"true"` or `"false"` — anything else is
    /// rejected by [`ProvisionOptions::validate`].
    pub public_ip: String,
    /// Optional extra data disk, in GiB.
    pub data_disk_gb: Option<u32>,
    pub agent_version: String,
    pub install_home: String,
    pub work_dir: String,
    /// `key=value` tags applied to the resource group and the VM.
    pub tags: Vec<String>,
}

impl ProvisionOptions {
    /// Built-in defaults for the given platform.
    #[must_use]
    pub fn defaults(platform: Platform) -> Self {
        let (image, install_home) = match platform {
            Platform::Linux => ("Ubuntu2204", "/opt/azagent"),
            Platform::Windows => ("Win2022Datacenter", r"C:\azagent"),
        };
        Self {
            vm_size: "Standard_DS2_v2".to_string(),
            image: image.to_string(),
            admin_username: "azureuser".to_string(),
            vnet_name: None,
            subnet_name: None,
            public_ip: "true".to_string(),
            data_disk_gb: None,
            agent_version: "3.243.1".to_string(),
            install_home: install_home.to_string(),
            work_dir: "_work".to_string(),
            tags: Vec::new(),
        }
    }

    /// Validate dependent-option invariants. Pure; called before any remote
    /// call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::InvalidConfiguration`] with a field-level
    /// message when a subnet is named without a virtual network, or when the
    /// public-IP flag is not exactly `"true"` or `"false"`.
    pub fn validate(&self) -> Result<(), ProvisionError> {
        if self.subnet_name.is_some() && self.vnet_name.is_none() {
            return Err(ProvisionError::InvalidConfiguration {
                field: "subnet-name".to_string(),
                message: "a subnet requires vnet-name to be set".to_string(),
            });
        }
        if self.public_ip != "true" && self.public_ip != "false" {
            return Err(ProvisionError::InvalidConfiguration {
                field: "public-ip".to_string(),
                message: format!("expected \"true\" or \"false\", got \"{}\"", self.public_ip),
            });
        }
        Ok(())
    }

    /// The validated public-IP flag as a boolean. Only meaningful after
    /// [`ProvisionOptions::validate`] has passed.
    #[must_use]
    pub fn wants_public_ip(&self) -> bool {
        self.public_ip == "true"
    }
}

// ── Secrets ──────────────────────────────────────────────────────────────────

/// Credentials for one run. Resolved once at the boundary, held only in
/// process memory, used once in outbound payloads, never written to disk.
pub struct Secrets {
    /// Pool-scoped access token.
    pub access_token: String,
    /// Administrator password; required for Windows targets only.
    pub admin_password: Option<String>,
}

// ── Result ───────────────────────────────────────────────────────────────────

/// What the operator gets back from a successful run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionResult {
    /// Public IP, when the VM has one.
    pub public_ip: Option<String>,
    /// Private IP, when reported by the creation response.
    pub private_ip: Option<String>,
    pub admin_username: String,
    /// Raw remote-execution output, surfaced verbatim for diagnosis.
    pub remote_output: String,
}

// ── Unit tests ───────────────────────────────────────────────────────────────
