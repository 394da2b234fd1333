//! Credential resolution at the process boundary.
//!
//! Secrets come from the environment or, interactively, from a single masked
//! prompt. The orchestrator never reaches into the environment itself — it
//! receives a fully resolved [`crate::domain::provision::Secrets`] value.

use anyhow::{Context, Result};

use crate::domain::error::ProvisionError;

/// Resolves named secrets from the environment with a masked-prompt fallback.
pub struct CredentialResolver {
    non_interactive: bool,
}

impl CredentialResolver {
    /// When `non_interactive` is `true` (CI, no TTY), the prompt fallback is
    /// disabled and an absent variable is an error.
    #[must_use]
    pub fn new(non_interactive: bool) -> Self {
        Self { non_interactive }
    }

    /// Look up `var` in the process environment; on absence perform a single
    /// interactive masked read. No retry, no caching beyond process lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::MissingCredential`] when the variable is
    /// unset or empty and no interactive prompt is possible, or when the
    /// prompt yields an empty value.
    pub fn resolve(&self, var: &str, prompt: &str) -> Result<String> {
        if let Ok(value) = std::env::var(var)
            && !value.trim().is_empty()
        {
            return Ok(value);
        }
        if self.non_interactive {
            return Err(ProvisionError::MissingCredential {
                name: var.to_string(),
            }
            .into());
        }
        let value = dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .with_context(|| format!("reading {var} from the terminal"))?;
        if value.trim().is_empty() {
            return Err(ProvisionError::MissingCredential {
                name: var.to_string(),
            }
            .into());
        }
        Ok(value)
    }
}
