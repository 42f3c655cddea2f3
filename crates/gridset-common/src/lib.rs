//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Shared primitives for the dataset tooling."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
//! Shared primitives for the gridset workspace.
//! This crate exposes configuration loading and logging setup consumed by the
//! dataset library and the operator CLI.

pub mod config;
pub mod logging;

pub use config::{GenerationConfig, GridsetConfig, LoadedConfig, LoggingConfig, OutputConfig};
pub use logging::{init_tracing, LogFormat};
