//! ---
//! ems_section: "15-testing-qa-runbook"
//! ems_subsection: "integration-tests"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Integration tests for dataset generation and line normalization."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use gridset_common::GenerationConfig;
use gridset_synth::{
    normalize_lines, GridDataset, GridGenerator, Line, MeasurementPoint, Substation,
    SynthError, TableRecord, Transformer,
};
use serde::de::DeserializeOwned;
use tempfile::tempdir;

fn small_settings() -> GenerationConfig {
    GenerationConfig {
        substation_count: 2,
        transformer_count: 3,
        line_count: 5,
        measurement_count: 2,
        start_year: 2020,
        end_year: 2020,
        seed: Some(2020),
        ..GenerationConfig::default()
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let mut reader = csv::Reader::from_path(path).expect("table readable");
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .expect("rows deserialize")
}

fn header_of(path: &Path) -> Vec<String> {
    let mut reader = csv::Reader::from_path(path).expect("table readable");
    reader
        .headers()
        .expect("header row")
        .iter()
        .map(str::to_owned)
        .collect()
}

#[test]
fn small_grid_round_trip_through_normalization() {
    let dir = tempdir().unwrap();
    let mut generator = GridGenerator::new(small_settings()).unwrap();
    let dataset = generator.generate().unwrap();
    let summary = dataset.write_all(dir.path()).unwrap();
    assert_eq!(summary.total_assets(), 2 + 3 + 5 + 2);
    assert_eq!(summary.table(Line::FILE_NAME).map(|t| t.records), Some(5));

    for (file, headers) in [
        (Substation::FILE_NAME, Substation::HEADERS),
        (Transformer::FILE_NAME, Transformer::HEADERS),
        (Line::FILE_NAME, Line::HEADERS),
        (MeasurementPoint::FILE_NAME, MeasurementPoint::HEADERS),
    ] {
        assert_eq!(header_of(&dir.path().join(file)), headers);
    }

    let first = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
    let in_window = |date: NaiveDate| first <= date && date <= last;

    let substations: Vec<Substation> = read_rows(&dir.path().join(Substation::FILE_NAME));
    let transformers: Vec<Transformer> = read_rows(&dir.path().join(Transformer::FILE_NAME));
    let lines: Vec<Line> = read_rows(&dir.path().join(Line::FILE_NAME));
    let measurements: Vec<MeasurementPoint> =
        read_rows(&dir.path().join(MeasurementPoint::FILE_NAME));
    assert_eq!(substations, dataset.substations);
    assert_eq!(lines.len(), 5);
    assert_eq!(measurements.len(), 2);

    assert!(substations.iter().all(|s| in_window(s.installed)));
    assert!(transformers.iter().all(|t| in_window(t.installed)));
    assert!(lines.iter().all(|l| in_window(l.installed)));
    assert!(measurements.iter().all(|m| in_window(m.installed)));

    let substation_ids: HashSet<_> = substations.iter().map(|s| s.id.as_str()).collect();
    assert!(transformers
        .iter()
        .all(|t| substation_ids.contains(t.substation_id.as_str())));

    let lines_path = GridDataset::lines_path(dir.path());
    let report = normalize_lines(&lines_path).unwrap();
    assert_eq!(report.rows, 5);
    assert_eq!(report.unmatched_endpoints, 0);
    assert_eq!(
        report.transformer_endpoints + report.substation_endpoints,
        10
    );

    let headers = header_of(&lines_path);
    assert_eq!(
        headers,
        [
            "id",
            "name",
            "type",
            "length_km",
            "voltage",
            "installed",
            "capacity_mw",
            "status",
            "from_trf_id",
            "from_sub_id",
            "to_trf_id",
            "to_sub_id",
        ]
    );
    let col = |name: &str| headers.iter().position(|h| h == name).unwrap();

    let mut reader = csv::Reader::from_path(&lines_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 5);
    for row in &rows {
        let from_trf = &row[col("from_trf_id")];
        let from_sub = &row[col("from_sub_id")];
        let to_trf = &row[col("to_trf_id")];
        let to_sub = &row[col("to_sub_id")];
        assert!(from_trf.is_empty() ^ from_sub.is_empty());
        assert!(to_trf.is_empty() ^ to_sub.is_empty());
        let from = if from_trf.is_empty() { from_sub } else { from_trf };
        let to = if to_trf.is_empty() { to_sub } else { to_trf };
        assert_ne!(from, to);
    }
}

#[test]
fn default_sized_dataset_meets_invariants() {
    let dir = tempdir().unwrap();
    let mut generator = GridGenerator::new(GenerationConfig {
        seed: Some(42),
        ..GenerationConfig::default()
    })
    .unwrap();
    let dataset = generator.generate().unwrap();
    let summary = dataset.write_all(dir.path()).unwrap();

    assert_eq!(summary.table(Substation::FILE_NAME).unwrap().records, 50);
    assert_eq!(summary.table(Transformer::FILE_NAME).unwrap().records, 800);
    assert_eq!(summary.table(Line::FILE_NAME).unwrap().records, 2500);
    // 1650 requested, capped at the 800 transformers available.
    assert_eq!(summary.table(MeasurementPoint::FILE_NAME).unwrap().records, 800);

    let monitored: HashSet<_> = dataset
        .measurement_points
        .iter()
        .map(|m| m.transformer_id.as_str())
        .collect();
    assert_eq!(monitored.len(), 800);

    for (ids, label) in [
        (
            dataset.substations.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            "substations",
        ),
        (
            dataset.transformers.iter().map(|t| t.id.as_str()).collect(),
            "transformers",
        ),
        (dataset.lines.iter().map(|l| l.id.as_str()).collect(), "lines"),
    ] {
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate ids in {label}");
    }
}

#[test]
fn normalizing_twice_reports_missing_column() {
    let dir = tempdir().unwrap();
    let dataset = GridGenerator::new(small_settings())
        .unwrap()
        .generate()
        .unwrap();
    dataset.write_all(dir.path()).unwrap();
    let lines_path = GridDataset::lines_path(dir.path());

    normalize_lines(&lines_path).unwrap();
    let before = fs::read_to_string(&lines_path).unwrap();
    let err = normalize_lines(&lines_path).unwrap_err();
    assert!(matches!(err, SynthError::MissingColumn { ref column, .. } if column == "from_id"));
    assert_eq!(fs::read_to_string(&lines_path).unwrap(), before);
}
