//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic grid dataset generation and table rewriting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SynthError>;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("invalid generation settings: {0}")]
    InvalidConfig(String),
    #[error("transformers requested but no substations were generated")]
    EmptyParentPool,
    #[error("lines need at least two endpoints, only {available} available")]
    InsufficientEndpoints { available: usize },
    #[error("no distinct line endpoint found after {attempts} redraws")]
    EndpointRedrawExhausted { attempts: usize },
    #[error("column `{column}` missing from {}", path.display())]
    MissingColumn { column: String, path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
