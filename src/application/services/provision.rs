//! Remote-bootstrap orchestration — the provisioning use-case.
//!
//! Turns a freshly created VM into a registered, running pipeline agent:
//! validate → ensure resource group → create VM → wait → extract endpoints →
//! assemble bootstrap script → execute remotely → report.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits. Nothing here is retried:
//! cloud operations are assumed individually reliable enough that masking a
//! failure would hide a real infrastructure problem, so every failure aborts
//! the run with the collaborator's own error text preserved.

use std::process::Output;

use anyhow::Result;

use crate::application::ports::{
    CloudProvisioner, CommandEngine, InstallerSource, ProgressReporter, VmAuth, VmSpec,
};
use crate::domain::error::ProvisionError;
use crate::domain::provision::{
    Platform, ProvisionOptions, ProvisionRequest, ProvisionResult, Secrets,
};
use crate::domain::template::{SlotValues, encode_payload};

/// Provision a VM and register it as an agent.
///
/// Fail-fast: validation happens before any remote call, and a failure at any
/// later step aborts the remaining steps with no compensating teardown — a VM
/// that exists when the bootstrap fails is left in place for the operator.
///
/// # Errors
///
/// Returns [`ProvisionError::MissingCredential`],
/// [`ProvisionError::InvalidConfiguration`],
/// [`ProvisionError::PrerequisiteMissing`], or
/// [`ProvisionError::ProvisioningFailed`]; see the crate error taxonomy.
pub async fn provision(
    cloud: &impl CloudProvisioner,
    installers: &impl InstallerSource,
    reporter: &impl ProgressReporter,
    request: &ProvisionRequest,
    options: &ProvisionOptions,
    secrets: &Secrets,
) -> Result<ProvisionResult> {
    validate(request.platform, options, secrets)?;

    ensure_group(cloud, reporter, request, options).await?;
    let (public_ip, private_ip) = create_vm(cloud, reporter, request, options, secrets).await?;

    reporter.step("assembling remote bootstrap script...");
    let script = build_remote_script(installers, request, options, secrets)?;

    reporter.step(&format!("registering agent '{}'...", request.agent_name));
    let remote_output = execute_remote(cloud, request, &script).await?;
    reporter.success(&format!(
        "agent '{}' registered to pool '{}'",
        request.agent_name, request.pool
    ));

    Ok(ProvisionResult {
        public_ip,
        private_ip,
        admin_username: options.admin_username.clone(),
        remote_output,
    })
}

// ── Steps ─────────────────────────────────────────────────────────────────────

/// Pre-flight checks. No remote call is made before these pass.
fn validate(platform: Platform, options: &ProvisionOptions, secrets: &Secrets) -> Result<()> {
    if secrets.access_token.trim().is_empty() {
        return Err(ProvisionError::MissingCredential {
            name: "AZP_TOKEN".to_string(),
        }
        .into());
    }
    if platform == Platform::Windows
        && secrets
            .admin_password
            .as_deref()
            .is_none_or(|p| p.trim().is_empty())
    {
        return Err(ProvisionError::MissingCredential {
            name: "WIN_ADMIN_PASSWORD".to_string(),
        }
        .into());
    }
    options.validate()?;
    Ok(())
}

async fn ensure_group(
    cloud: &impl CloudProvisioner,
    reporter: &impl ProgressReporter,
    request: &ProvisionRequest,
    options: &ProvisionOptions,
) -> Result<()> {
    reporter.step(&format!(
        "ensuring resource group '{}' in {}...",
        request.resource_group, request.location
    ));
    let out = cloud
        .ensure_group(&request.resource_group, &request.location, &options.tags)
        .await
        .map_err(|e| failed_call("creating resource group", &e))?;
    if !out.status.success() {
        return Err(failed("creating resource group", &out));
    }
    reporter.success(&format!("resource group '{}' ready", request.resource_group));
    Ok(())
}

/// Create the VM, wait for the cloud's "created" signal, and pull the
/// endpoint fields out of the creation response.
async fn create_vm(
    cloud: &impl CloudProvisioner,
    reporter: &impl ProgressReporter,
    request: &ProvisionRequest,
    options: &ProvisionOptions,
    secrets: &Secrets,
) -> Result<(Option<String>, Option<String>)> {
    let auth = match request.platform {
        Platform::Linux => VmAuth::SshKeyPair,
        // Presence checked in validate(); windows always carries a password.
        Platform::Windows => VmAuth::Password(secrets.admin_password.as_deref().unwrap_or("")),
    };
    let spec = VmSpec {
        resource_group: &request.resource_group,
        name: &request.vm_name,
        image: &options.image,
        size: &options.vm_size,
        admin_username: &options.admin_username,
        auth,
        vnet_name: options.vnet_name.as_deref(),
        subnet_name: options.subnet_name.as_deref(),
        public_ip: options.wants_public_ip(),
        data_disk_gb: options.data_disk_gb,
        tags: &options.tags,
    };

    reporter.step(&format!("creating virtual machine '{}'...", request.vm_name));
    let out = cloud
        .create_vm(&spec)
        .await
        .map_err(|e| failed_call("creating virtual machine", &e))?;
    if !out.status.success() {
        return Err(failed("creating virtual machine", &out));
    }
    let endpoints = extract_endpoints(&out.stdout);

    let waited = cloud
        .wait_created(&request.resource_group, &request.vm_name)
        .await
        .map_err(|e| failed_call("waiting for virtual machine", &e))?;
    if !waited.status.success() {
        return Err(failed("waiting for virtual machine", &waited));
    }
    reporter.success(&format!("virtual machine '{}' created", request.vm_name));

    Ok(endpoints)
}

/// Read the installer, encode it, and render the platform bootstrap template.
fn build_remote_script(
    installers: &impl InstallerSource,
    request: &ProvisionRequest,
    options: &ProvisionOptions,
    secrets: &Secrets,
) -> Result<String> {
    let payload = installers.installer(request.platform)?;
    let template = installers.bootstrap_template(request.platform)?;
    Ok(template.render(&SlotValues {
        installer_payload: encode_payload(&payload),
        access_token: secrets.access_token.clone(),
        agent_version: options.agent_version.clone(),
        install_home: options.install_home.clone(),
        work_dir: options.work_dir.clone(),
        organization_url: request.organization_url.clone(),
        pool: request.pool.clone(),
        agent_name: request.agent_name.clone(),
    }))
}

/// Run the bootstrap script on the VM and surface its output verbatim.
async fn execute_remote(
    cloud: &impl CloudProvisioner,
    request: &ProvisionRequest,
    script: &str,
) -> Result<String> {
    let engine = CommandEngine::for_platform(request.platform);
    let out = cloud
        .invoke(&request.resource_group, &request.vm_name, engine, script)
        .await
        .map_err(|e| failed_call("executing remote bootstrap", &e))?;
    if !out.status.success() {
        return Err(failed("executing remote bootstrap", &out));
    }
    Ok(remote_message(&out))
}

// ── Private helpers ──────────────────────────────────────────────────────────

/// Tolerant endpoint extraction: not every VM has a public address, so a
/// missing field is reported as `None`, never as an error.
fn extract_endpoints(stdout: &[u8]) -> (Option<String>, Option<String>) {
    let Ok(created) = serde_json::from_slice::<serde_json::Value>(stdout) else {
        return (None, None);
    };
    let field = |name: &str| {
        created
            .get(name)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from)
    };
    (field("publicIpAddress"), field("privateIpAddress"))
}

/// The run-command response wraps its output in `value[0].message`; fall back
/// to raw stdout when the response is not in that shape.
fn remote_message(out: &Output) -> String {
    serde_json::from_slice::<serde_json::Value>(&out.stdout)
        .ok()
        .and_then(|v| {
            v.get("value")?
                .as_array()?
                .first()?
                .get("message")?
                .as_str()
                .map(String::from)
        })
        .unwrap_or_else(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

/// A step's collaborator reported failure: preserve its error text unmodified.
fn failed(stage: &str, out: &Output) -> anyhow::Error {
    let stderr = String::from_utf8_lossy(&out.stderr);
    let detail = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&out.stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    };
    ProvisionError::ProvisioningFailed {
        stage: stage.to_string(),
        detail,
    }
    .into()
}

/// The collaborator invocation itself failed (e.g. the CLI is not installed).
fn failed_call(stage: &str, err: &anyhow::Error) -> anyhow::Error {
    ProvisionError::ProvisioningFailed {
        stage: stage.to_string(),
        detail: format!("{err:#}"),
    }
    .into()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
