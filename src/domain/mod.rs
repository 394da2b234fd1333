//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod provision;
pub mod template;

#[allow(unused_imports)]
pub use config::{OperatorConfig, VALID_CONFIG_KEYS, validate_config_key, validate_config_value};
#[allow(unused_imports)]
pub use error::{ConfigError, ProvisionError};
#[allow(unused_imports)]
pub use provision::{Platform, ProvisionOptions, ProvisionRequest, ProvisionResult, Secrets};
#[allow(unused_imports)]
pub use template::{ScriptTemplate, Slot, SlotValues, encode_payload};
