//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Provisioning errors ──────────────────────────────────────────────────────

/// Errors surfaced by a provisioning run.
///
/// Every variant is terminal for the run: nothing is retried and no
/// compensating teardown is attempted. A VM left behind by a failed run is
/// the operator's to reconcile or delete.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Missing credential: {name} is not set and no interactive prompt is available.")]
    MissingCredential { name: String },

    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfiguration { field: String, message: String },

    #[error("Prerequisite missing: {0}")]
    PrerequisiteMissing(String),

    #[error("Provisioning failed while {stage}.\n{detail}")]
    ProvisioningFailed { stage: String, detail: String },
}

impl ProvisionError {
    /// Stable machine-readable code, used by the `--json` error object.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "missing-credential",
            Self::InvalidConfiguration { .. } => "invalid-configuration",
            Self::PrerequisiteMissing(_) => "prerequisite-missing",
            Self::ProvisioningFailed { .. } => "provisioning-failed",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to operator-default key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
