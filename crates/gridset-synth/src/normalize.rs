//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic grid dataset generation and table rewriting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
//! Splits the generic line endpoint columns into typed reference columns.
//!
//! `from_id`/`to_id` are replaced by `from_trf_id, from_sub_id, to_trf_id,
//! to_sub_id`, appended after the remaining columns in their original order.
//! The file is rewritten in place with no backup.
use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::info;

use crate::catalog::AssetKind;
use crate::errors::{Result, SynthError};

pub const FROM_COLUMN: &str = "from_id";
pub const TO_COLUMN: &str = "to_id";
pub const TYPED_COLUMNS: [&str; 4] = ["from_trf_id", "from_sub_id", "to_trf_id", "to_sub_id"];

/// Counts collected while rewriting the line table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub rows: usize,
    pub transformer_endpoints: usize,
    pub substation_endpoints: usize,
    /// Endpoints whose id matched neither prefix; both typed cells stay empty.
    pub unmatched_endpoints: usize,
}

impl NormalizeReport {
    /// Returns the `(trf, sub)` cells for an endpoint id.
    fn split<'a>(&mut self, id: &'a str) -> (&'a str, &'a str) {
        match AssetKind::from_id(id) {
            Some(AssetKind::Transformer) => {
                self.transformer_endpoints += 1;
                (id, "")
            }
            Some(AssetKind::Substation) => {
                self.substation_endpoints += 1;
                ("", id)
            }
            _ => {
                self.unmatched_endpoints += 1;
                ("", "")
            }
        }
    }
}

/// Rewrite the line table at `path` with typed endpoint columns.
///
/// Fails with [`SynthError::MissingColumn`] when either endpoint column is
/// absent, e.g. on a table that was already normalized; the file is left
/// untouched in that case.
pub fn normalize_lines(path: &Path) -> Result<NormalizeReport> {
    let (headers, rows) = read_table(path)?;
    let from_idx = column_index(&headers, FROM_COLUMN, path)?;
    let to_idx = column_index(&headers, TO_COLUMN, path)?;
    let keep: Vec<usize> = (0..headers.len())
        .filter(|idx| *idx != from_idx && *idx != to_idx)
        .collect();

    let mut out_headers: StringRecord = keep.iter().map(|idx| &headers[*idx]).collect();
    for column in TYPED_COLUMNS {
        out_headers.push_field(column);
    }

    let mut report = NormalizeReport::default();
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(File::create(path)?);
    writer.write_record(&out_headers)?;
    for row in &rows {
        let (from_trf, from_sub) = report.split(row.get(from_idx).unwrap_or_default());
        let (to_trf, to_sub) = report.split(row.get(to_idx).unwrap_or_default());
        let mut out: StringRecord = keep
            .iter()
            .map(|idx| row.get(*idx).unwrap_or_default())
            .collect();
        for cell in [from_trf, from_sub, to_trf, to_sub] {
            out.push_field(cell);
        }
        writer.write_record(&out)?;
        report.rows += 1;
    }
    writer.flush()?;

    info!(
        path = %path.display(),
        rows = report.rows,
        transformer_endpoints = report.transformer_endpoints,
        substation_endpoints = report.substation_endpoints,
        unmatched_endpoints = report.unmatched_endpoints,
        "line table normalized"
    );
    Ok(report)
}

/// Load the whole table so the source handle is closed before rewriting.
fn read_table(path: &Path) -> Result<(StringRecord, Vec<StringRecord>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(File::open(path)?);
    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((headers, rows))
}

fn column_index(headers: &StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| SynthError::MissingColumn {
            column: column.to_owned(),
            path: path.to_path_buf(),
        })
}
