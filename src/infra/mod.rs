//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the cloud
//! CLI adapter, credential resolution, embedded assets, and config storage.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod azure;
pub mod command_runner;
pub mod config;
pub mod credentials;
pub mod installer;
