//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic grid dataset generation and table rewriting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
//! Fixed enumerations and value ranges used by the generators.
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Kinds of generated assets, each with its own identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Substation,
    Transformer,
    Line,
    MeasurementPoint,
}

impl AssetKind {
    pub const fn all() -> &'static [AssetKind] {
        &[
            AssetKind::Substation,
            AssetKind::Transformer,
            AssetKind::Line,
            AssetKind::MeasurementPoint,
        ]
    }

    /// Tag placed in front of the random token, without the separator.
    pub fn prefix(self) -> &'static str {
        match self {
            AssetKind::Substation => "SUB",
            AssetKind::Transformer => "TRF",
            AssetKind::Line => "LINE",
            AssetKind::MeasurementPoint => "MEAS",
        }
    }

    /// Resolve the asset kind from an identifier such as `TRF-1A2B3C4D`.
    pub fn from_id(id: &str) -> Option<AssetKind> {
        let (prefix, token) = id.split_once(crate::ids::SEPARATOR)?;
        if token.is_empty() {
            return None;
        }
        AssetKind::all()
            .iter()
            .copied()
            .find(|kind| kind.prefix() == prefix)
    }
}

/// Nominal voltage tiers ordered from transmission down to end-customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VoltageLevel {
    #[serde(rename = "400kV")]
    Kv400,
    #[serde(rename = "110kV")]
    Kv110,
    #[serde(rename = "20kV")]
    Kv20,
    #[serde(rename = "10kV")]
    Kv10,
    #[serde(rename = "0.4kV")]
    Kv0_4,
}

/// Tiers a substation may operate at; the end-customer tiers are excluded.
pub const SUBSTATION_TIERS: &[VoltageLevel] =
    &[VoltageLevel::Kv400, VoltageLevel::Kv110, VoltageLevel::Kv20];

impl VoltageLevel {
    pub const fn all() -> &'static [VoltageLevel] {
        &[
            VoltageLevel::Kv400,
            VoltageLevel::Kv110,
            VoltageLevel::Kv20,
            VoltageLevel::Kv10,
            VoltageLevel::Kv0_4,
        ]
    }

    /// Next lower tier, or the same tier when already at the bottom.
    pub fn step_down(self) -> VoltageLevel {
        let levels = Self::all();
        let idx = levels
            .iter()
            .position(|level| *level == self)
            .unwrap_or(levels.len() - 1);
        levels.get(idx + 1).copied().unwrap_or(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubstationType {
    Primary,
    Secondary,
    Distribution,
}

impl SubstationType {
    pub const fn all() -> &'static [SubstationType] {
        &[
            SubstationType::Primary,
            SubstationType::Secondary,
            SubstationType::Distribution,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformerType {
    Distribution,
    Power,
    #[serde(rename = "Step-Down")]
    StepDown,
    #[serde(rename = "Step-Up")]
    StepUp,
}

impl TransformerType {
    pub const fn all() -> &'static [TransformerType] {
        &[
            TransformerType::Distribution,
            TransformerType::Power,
            TransformerType::StepDown,
            TransformerType::StepUp,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineType {
    Overhead,
    Underground,
    Cable,
}

impl LineType {
    pub const fn all() -> &'static [LineType] {
        &[LineType::Overhead, LineType::Underground, LineType::Cable]
    }
}

/// Quantity observed by a measurement point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementKind {
    Current,
    Voltage,
    Power,
    Temperature,
}

impl MeasurementKind {
    pub const fn all() -> &'static [MeasurementKind] {
        &[
            MeasurementKind::Current,
            MeasurementKind::Voltage,
            MeasurementKind::Power,
            MeasurementKind::Temperature,
        ]
    }
}

/// Operational status shared by every asset kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    Active,
    Maintenance,
    Standby,
    #[serde(rename = "Under_Repair")]
    UnderRepair,
}

/// Discrete status distribution as `(status, relative weight)` pairs.
pub type StatusWeights = &'static [(AssetStatus, u32)];

pub const SUBSTATION_STATUS: StatusWeights =
    &[(AssetStatus::Active, 3), (AssetStatus::Maintenance, 1)];
pub const TRANSFORMER_STATUS: StatusWeights =
    &[(AssetStatus::Active, 3), (AssetStatus::Standby, 1)];
pub const LINE_STATUS: StatusWeights = &[(AssetStatus::Active, 3), (AssetStatus::UnderRepair, 1)];

pub const SUBSTATION_CAPACITY_MVA: RangeInclusive<u32> = 50..=500;
pub const TRANSFORMER_RATING_MVA: RangeInclusive<u32> = 1..=100;
pub const TRANSFORMER_EFFICIENCY: RangeInclusive<f64> = 0.95..=0.99;
pub const LINE_LENGTH_KM: RangeInclusive<f64> = 0.1..=50.0;
pub const LINE_CAPACITY_MW: RangeInclusive<u32> = 1..=200;
pub const SAMPLING_RATES_HZ: &[u32] = &[1, 10, 50, 100];
pub const ACCURACY_PERCENT: RangeInclusive<f64> = 0.1..=2.0;

/// Round to a fixed number of decimal places for tabular output.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_down_walks_the_ordered_tiers() {
        assert_eq!(VoltageLevel::Kv400.step_down(), VoltageLevel::Kv110);
        assert_eq!(VoltageLevel::Kv110.step_down(), VoltageLevel::Kv20);
        assert_eq!(VoltageLevel::Kv20.step_down(), VoltageLevel::Kv10);
        assert_eq!(VoltageLevel::Kv10.step_down(), VoltageLevel::Kv0_4);
        assert_eq!(VoltageLevel::Kv0_4.step_down(), VoltageLevel::Kv0_4);
    }

    #[test]
    fn substation_tiers_are_the_three_highest() {
        assert_eq!(SUBSTATION_TIERS, &VoltageLevel::all()[..3]);
    }

    #[test]
    fn asset_kind_resolves_from_prefix() {
        assert_eq!(AssetKind::from_id("SUB-ABCD1234"), Some(AssetKind::Substation));
        assert_eq!(AssetKind::from_id("TRF-00FF00FF"), Some(AssetKind::Transformer));
        assert_eq!(AssetKind::from_id("LINE-1"), Some(AssetKind::Line));
        assert_eq!(AssetKind::from_id("XFMR-12345678"), None);
        assert_eq!(AssetKind::from_id("SUB-"), None);
        assert_eq!(AssetKind::from_id(""), None);
    }

    #[test]
    fn status_tables_favour_active() {
        for table in [SUBSTATION_STATUS, TRANSFORMER_STATUS, LINE_STATUS] {
            let total: u32 = table.iter().map(|(_, w)| w).sum();
            let active = table
                .iter()
                .find(|(status, _)| *status == AssetStatus::Active)
                .map(|(_, w)| *w)
                .unwrap();
            assert_eq!(active * 4, total * 3);
        }
    }

    #[test]
    fn round_to_truncates_noise() {
        assert_eq!(round_to(0.97349, 3), 0.973);
        assert_eq!(round_to(12.3456, 2), 12.35);
        assert_eq!(round_to(1.0, 2), 1.0);
    }
}
