//! Domain types and validators for operator defaults.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "defaults.location",
    "defaults.vm-size",
    "defaults.admin-username",
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.poolhand/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OperatorConfig {
    /// Default values merged under CLI flags and environment variables.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Operator-chosen defaults for provisioning runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultsConfig {
    pub location: Option<String>,
    #[serde(rename = "vm-size")]
    pub vm_size: Option<String>,
    #[serde(rename = "admin-username")]
    pub admin_username: Option<String>,
}

impl OperatorConfig {
    /// Read the value stored under a validated key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "defaults.location" => self.defaults.location.as_deref(),
            "defaults.vm-size" => self.defaults.vm_size.as_deref(),
            "defaults.admin-username" => self.defaults.admin_username.as_deref(),
            _ => None,
        }
    }

    /// Store a value under a validated key.
    pub fn set(&mut self, key: &str, value: String) {
        match key {
            "defaults.location" => self.defaults.location = Some(value),
            "defaults.vm-size" => self.defaults.vm_size = Some(value),
            "defaults.admin-username" => self.defaults.admin_username = Some(value),
            _ => {}
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is empty or whitespace-only.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: "any non-empty string".to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
