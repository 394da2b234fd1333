//! Infrastructure implementation of the cloud port traits.
//!
//! `AzCli<R>` routes every Azure CLI call through a [`CommandRunner`].
//! Generic over `R` so that tests can inject a recording runner without
//! spawning real processes.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{
    CommandEngine, RemoteCommands, ResourceGroups, VirtualMachines, VmAuth, VmSpec,
};
use crate::infra::command_runner::{CommandRunner, TokioCommandRunner};

/// Azure CLI adapter.
pub struct AzCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> AzCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl AzCli<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

fn command_id(engine: CommandEngine) -> &'static str {
    match engine {
        CommandEngine::Shell => "RunShellScript",
        CommandEngine::PowerShell => "RunPowerShellScript",
    }
}

fn push_tags(args: &mut Vec<String>, tags: &[String]) {
    if !tags.is_empty() {
        args.push("--tags".to_string());
        args.extend(tags.iter().cloned());
    }
}

impl<R: CommandRunner> ResourceGroups for AzCli<R> {
    async fn ensure_group(&self, name: &str, location: &str, tags: &[String]) -> Result<Output> {
        // `az group create` is create-or-reuse: an existing group with the
        // same name succeeds and is returned unchanged.
        let mut args = vec![
            "group".to_string(),
            "create".to_string(),
            "--name".to_string(),
            name.to_string(),
            "--location".to_string(),
            location.to_string(),
            "--output".to_string(),
            "json".to_string(),
        ];
        push_tags(&mut args, tags);
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner.run("az", &refs).await.context("az group create")
    }
}

impl<R: CommandRunner> VirtualMachines for AzCli<R> {
    async fn create_vm(&self, spec: &VmSpec<'_>) -> Result<Output> {
        let mut args = vec![
            "vm".to_string(),
            "create".to_string(),
            "--resource-group".to_string(),
            spec.resource_group.to_string(),
            "--name".to_string(),
            spec.name.to_string(),
            "--image".to_string(),
            spec.image.to_string(),
            "--size".to_string(),
            spec.size.to_string(),
            "--admin-username".to_string(),
            spec.admin_username.to_string(),
        ];
        match spec.auth {
            VmAuth::SshKeyPair => args.push("--generate-ssh-keys".to_string()),
            VmAuth::Password(password) => {
                args.push("--admin-password".to_string());
                args.push(password.to_string());
            }
        }
        if let Some(vnet) = spec.vnet_name {
            args.push("--vnet-name".to_string());
            args.push(vnet.to_string());
        }
        if let Some(subnet) = spec.subnet_name {
            args.push("--subnet".to_string());
            args.push(subnet.to_string());
        }
        if !spec.public_ip {
            // An empty value tells the CLI to attach no public address.
            args.push("--public-ip-address".to_string());
            args.push(String::new());
        }
        if let Some(gb) = spec.data_disk_gb {
            args.push("--data-disk-sizes-gb".to_string());
            args.push(gb.to_string());
        }
        push_tags(&mut args, spec.tags);
        args.push("--output".to_string());
        args.push("json".to_string());

        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner.run_unbounded("az", &refs).await.context("az vm create")
    }

    async fn wait_created(&self, resource_group: &str, name: &str) -> Result<Output> {
        self.runner
            .run_unbounded(
                "az",
                &[
                    "vm",
                    "wait",
                    "--created",
                    "--resource-group",
                    resource_group,
                    "--name",
                    name,
                ],
            )
            .await
            .context("az vm wait")
    }
}

impl<R: CommandRunner> RemoteCommands for AzCli<R> {
    async fn invoke(
        &self,
        resource_group: &str,
        name: &str,
        engine: CommandEngine,
        script: &str,
    ) -> Result<Output> {
        self.runner
            .run_unbounded(
                "az",
                &[
                    "vm",
                    "run-command",
                    "invoke",
                    "--resource-group",
                    resource_group,
                    "--name",
                    name,
                    "--command-id",
                    command_id(engine),
                    "--scripts",
                    script,
                    "--output",
                    "json",
                ],
            )
            .await
            .context("az vm run-command invoke")
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
