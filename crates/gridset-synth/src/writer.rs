//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic grid dataset generation and table rewriting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use tracing::info;

use crate::catalog::AssetKind;
use crate::errors::Result;

/// A record type that maps onto one flat table with a fixed column order.
///
/// `HEADERS` must list the serialized field names in declaration order.
pub trait TableRecord: Serialize {
    const KIND: AssetKind;
    const FILE_NAME: &'static str;
    const HEADERS: &'static [&'static str];
}

/// Create or truncate `path` and write a header row plus one row per record.
///
/// Returns the number of data rows written.
pub fn write_table<T: TableRecord>(path: &Path, records: &[T]) -> Result<usize> {
    let file = File::create(path)?;
    let count = write_records(file, records)?;
    info!(
        table = T::FILE_NAME,
        kind = T::KIND.prefix(),
        records = count,
        path = %path.display(),
        "table written"
    );
    Ok(count)
}

/// Write a header row and records to any sink.
pub fn write_records<T: TableRecord, W: Write>(sink: W, records: &[T]) -> Result<usize> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(sink);
    writer.write_record(T::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(records.len())
}
