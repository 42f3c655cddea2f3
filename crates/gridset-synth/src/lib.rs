//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "01-bootstrap"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic grid dataset module exports and shared types."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
//! Synthetic municipal grid datasets for graph database fixtures.
//!
//! A run generates substations, transformers, lines and measurement points,
//! writes them as CSV tables, and can afterwards split the line table's
//! generic endpoint columns into transformer/substation reference columns.

pub mod catalog;
pub mod dataset;
pub mod dates;
pub mod errors;
pub mod generator;
pub mod ids;
pub mod model;
pub mod normalize;
pub mod writer;

pub use catalog::{AssetKind, AssetStatus, VoltageLevel};
pub use dataset::{DatasetSummary, GridDataset, TableSummary};
pub use errors::{Result, SynthError};
pub use generator::GridGenerator;
pub use model::{Line, MeasurementPoint, Substation, Transformer};
pub use normalize::{normalize_lines, NormalizeReport};
pub use writer::{write_table, TableRecord};
