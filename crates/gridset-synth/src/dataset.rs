//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic grid dataset generation and table rewriting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::Result;
use crate::model::{Line, MeasurementPoint, Substation, Transformer};
use crate::writer::{write_table, TableRecord};

/// One generation run held in memory until it is serialized.
#[derive(Debug, Clone, Default)]
pub struct GridDataset {
    pub substations: Vec<Substation>,
    pub transformers: Vec<Transformer>,
    pub lines: Vec<Line>,
    pub measurement_points: Vec<MeasurementPoint>,
}

/// Outcome of writing a single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub file_name: &'static str,
    pub path: PathBuf,
    pub records: usize,
}

/// Outcome of writing the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub tables: Vec<TableSummary>,
}

impl DatasetSummary {
    pub fn total_assets(&self) -> usize {
        self.tables.iter().map(|table| table.records).sum()
    }

    pub fn table(&self, file_name: &str) -> Option<&TableSummary> {
        self.tables.iter().find(|table| table.file_name == file_name)
    }
}

impl GridDataset {
    pub fn total_assets(&self) -> usize {
        self.substations.len()
            + self.transformers.len()
            + self.lines.len()
            + self.measurement_points.len()
    }

    /// Location of the line table inside an output directory.
    pub fn lines_path(dir: &Path) -> PathBuf {
        dir.join(Line::FILE_NAME)
    }

    /// Write all four tables into `dir`, which must already exist.
    pub fn write_all(&self, dir: &Path) -> Result<DatasetSummary> {
        let tables = vec![
            write_one(dir, &self.substations)?,
            write_one(dir, &self.transformers)?,
            write_one(dir, &self.lines)?,
            write_one(dir, &self.measurement_points)?,
        ];
        let summary = DatasetSummary { tables };
        info!(
            total_assets = summary.total_assets(),
            dir = %dir.display(),
            "dataset written"
        );
        Ok(summary)
    }
}

fn write_one<T: TableRecord>(dir: &Path, records: &[T]) -> Result<TableSummary> {
    let path = dir.join(T::FILE_NAME);
    let records = write_table(&path, records)?;
    Ok(TableSummary {
        file_name: T::FILE_NAME,
        path,
        records,
    })
}
