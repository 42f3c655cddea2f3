//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic grid dataset generation and table rewriting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    AssetKind, AssetStatus, LineType, MeasurementKind, SubstationType, TransformerType,
    VoltageLevel,
};
use crate::writer::TableRecord;

/// Substation row in `substations.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substation {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SubstationType,
    pub voltage_level: VoltageLevel,
    pub installed: NaiveDate,
    pub capacity_mva: u32,
    pub status: AssetStatus,
}

/// Transformer row in `transformers.csv`, attached to exactly one substation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformer {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransformerType,
    pub primary_voltage: VoltageLevel,
    pub secondary_voltage: VoltageLevel,
    pub rating_mva: u32,
    pub installed: NaiveDate,
    pub substation_id: String,
    pub efficiency: f64,
    pub status: AssetStatus,
}

/// Line row in `lines.csv` before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LineType,
    pub from_id: String,
    pub to_id: String,
    pub length_km: f64,
    pub voltage: VoltageLevel,
    pub installed: NaiveDate,
    pub capacity_mw: u32,
    pub status: AssetStatus,
}

/// Measurement point row in `measurements.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    pub id: String,
    pub name: String,
    pub transformer_id: String,
    #[serde(rename = "type")]
    pub kind: MeasurementKind,
    pub installed: NaiveDate,
    pub sampling_rate_hz: u32,
    pub accuracy_percent: f64,
    pub status: AssetStatus,
}

impl TableRecord for Substation {
    const KIND: AssetKind = AssetKind::Substation;
    const FILE_NAME: &'static str = "substations.csv";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "type",
        "voltage_level",
        "installed",
        "capacity_mva",
        "status",
    ];
}

impl TableRecord for Transformer {
    const KIND: AssetKind = AssetKind::Transformer;
    const FILE_NAME: &'static str = "transformers.csv";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "type",
        "primary_voltage",
        "secondary_voltage",
        "rating_mva",
        "installed",
        "substation_id",
        "efficiency",
        "status",
    ];
}

impl TableRecord for Line {
    const KIND: AssetKind = AssetKind::Line;
    const FILE_NAME: &'static str = "lines.csv";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "type",
        "from_id",
        "to_id",
        "length_km",
        "voltage",
        "installed",
        "capacity_mw",
        "status",
    ];
}

impl TableRecord for MeasurementPoint {
    const KIND: AssetKind = AssetKind::MeasurementPoint;
    const FILE_NAME: &'static str = "measurements.csv";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "transformer_id",
        "type",
        "installed",
        "sampling_rate_hz",
        "accuracy_percent",
        "status",
    ];
}

/// Either kind of asset a line may terminate at.
#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    Substation(&'a Substation),
    Transformer(&'a Transformer),
}

impl<'a> Endpoint<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Endpoint::Substation(sub) => &sub.id,
            Endpoint::Transformer(trf) => &trf.id,
        }
    }

    /// Voltage a line leaving this endpoint runs at.
    pub fn outgoing_voltage(&self) -> VoltageLevel {
        match self {
            Endpoint::Substation(sub) => sub.voltage_level,
            Endpoint::Transformer(trf) => trf.secondary_voltage,
        }
    }
}
