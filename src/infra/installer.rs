//! Installer scripts and bootstrap templates.
//!
//! At compile time, `include_dir!` embeds everything under `assets/`:
//!   - `install-agent.sh` / `install-agent.ps1` — the companion installer
//!     scripts whose raw bytes become the base64 payload slot
//!   - `bootstrap.sh.tmpl` / `bootstrap.ps1.tmpl` — the remote-script
//!     templates the payload and run parameters are substituted into
//!
//! An override directory lets the operator ship a patched installer without
//! rebuilding; a named script missing from that directory is a
//! `PrerequisiteMissing` failure, not a silent fallback to the embedded copy.

use std::path::PathBuf;

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};

use crate::application::ports::InstallerSource;
use crate::domain::error::ProvisionError;
use crate::domain::provision::Platform;
use crate::domain::template::ScriptTemplate;

static EMBEDDED_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

fn installer_name(platform: Platform) -> &'static str {
    match platform {
        Platform::Linux => "install-agent.sh",
        Platform::Windows => "install-agent.ps1",
    }
}

fn template_name(platform: Platform) -> &'static str {
    match platform {
        Platform::Linux => "bootstrap.sh.tmpl",
        Platform::Windows => "bootstrap.ps1.tmpl",
    }
}

/// Production [`InstallerSource`] backed by embedded assets.
pub struct EmbeddedInstallers {
    override_dir: Option<PathBuf>,
}

impl EmbeddedInstallers {
    #[must_use]
    pub fn new() -> Self {
        Self { override_dir: None }
    }

    /// Read installer scripts from `dir` instead of the embedded copies.
    #[must_use]
    pub fn with_override_dir(dir: PathBuf) -> Self {
        Self {
            override_dir: Some(dir),
        }
    }
}

impl Default for EmbeddedInstallers {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallerSource for EmbeddedInstallers {
    fn installer(&self, platform: Platform) -> Result<Vec<u8>> {
        let name = installer_name(platform);
        if let Some(dir) = &self.override_dir {
            let path = dir.join(name);
            if !path.is_file() {
                return Err(ProvisionError::PrerequisiteMissing(format!(
                    "installer script not found: {}",
                    path.display()
                ))
                .into());
            }
            return std::fs::read(&path)
                .with_context(|| format!("reading {}", path.display()));
        }
        EMBEDDED_ASSETS
            .get_file(name)
            .map(|f| f.contents().to_vec())
            .ok_or_else(|| {
                ProvisionError::PrerequisiteMissing(format!("embedded installer script: {name}"))
                    .into()
            })
    }

    fn bootstrap_template(&self, platform: Platform) -> Result<ScriptTemplate> {
        let name = template_name(platform);
        let file = EMBEDDED_ASSETS.get_file(name).ok_or_else(|| {
            anyhow::Error::from(ProvisionError::PrerequisiteMissing(format!(
                "embedded bootstrap template: {name}"
            )))
        })?;
        let text = file
            .contents_utf8()
            .with_context(|| format!("{name} is not valid UTF-8"))?;
        Ok(ScriptTemplate::new(text))
    }
}
