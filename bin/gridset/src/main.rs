//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "01-bootstrap"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Operator CLI for synthetic grid dataset generation."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use gridset_common::{init_tracing, GridsetConfig};
use gridset_synth::{normalize_lines, DatasetSummary, GridDataset, GridGenerator, NormalizeReport};
use tracing::info;

const CONFIG_CANDIDATES: &[&str] = &["gridset.toml", "configs/gridset.toml"];

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Generate synthetic municipal grid tables for graph database import",
    long_about = None
)]
struct Cli {
    /// Print version information and exit
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    version: bool,

    /// Configuration file (defaults to gridset.toml or configs/gridset.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate substations, transformers, lines and measurement points
    Generate(GenerateArgs),
    /// Split lines.csv endpoint columns into transformer/substation columns
    NormalizeLines(NormalizeArgs),
}

#[derive(Debug, Default, Args)]
struct GenerateArgs {
    /// Directory receiving the four CSV tables
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Random seed for a reproducible dataset
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    substations: Option<usize>,

    #[arg(long)]
    transformers: Option<usize>,

    #[arg(long)]
    lines: Option<usize>,

    #[arg(long)]
    measurements: Option<usize>,

    /// First installation year for infrastructure assets
    #[arg(long)]
    start_year: Option<i32>,

    /// Last installation year for every asset
    #[arg(long)]
    end_year: Option<i32>,

    /// Normalize lines.csv right after writing it
    #[arg(long, action = ArgAction::SetTrue)]
    normalize: bool,
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    /// Line table to rewrite in place
    #[arg(long, value_name = "FILE", default_value = "lines.csv")]
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("gridset {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let command = cli
        .command
        .ok_or_else(|| anyhow!("a subcommand is required, see --help"))?;

    let config = load_config(cli.config.as_deref())?;
    init_tracing("gridset", &config.logging)?;

    match command {
        Commands::Generate(args) => {
            let outcome = run_generate(config, &args)?;
            eprintln!(
                "generated {} assets -> {}",
                outcome.summary.total_assets(),
                outcome.output_dir.display()
            );
            if let Some(report) = outcome.normalized {
                eprintln!("normalized {} line rows", report.rows);
            }
        }
        Commands::NormalizeLines(args) => {
            let report = run_normalize(&args.input)?;
            eprintln!(
                "normalized {} line rows -> {}",
                report.rows,
                args.input.display()
            );
        }
    }
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<GridsetConfig> {
    match explicit {
        Some(path) => GridsetConfig::from_path(path),
        None => {
            let loaded = GridsetConfig::load_with_source(CONFIG_CANDIDATES)?;
            if let Some(source) = &loaded.source {
                info!(config = %source.display(), "configuration loaded");
            }
            Ok(loaded.config)
        }
    }
}

/// Merge command line overrides into the loaded configuration.
fn apply_overrides(config: &mut GridsetConfig, args: &GenerateArgs) -> Result<()> {
    let generation = &mut config.generation;
    if let Some(seed) = args.seed {
        generation.seed = Some(seed);
    }
    if let Some(count) = args.substations {
        generation.substation_count = count;
    }
    if let Some(count) = args.transformers {
        generation.transformer_count = count;
    }
    if let Some(count) = args.lines {
        generation.line_count = count;
    }
    if let Some(count) = args.measurements {
        generation.measurement_count = count;
    }
    if let Some(year) = args.start_year {
        generation.start_year = year;
    }
    if let Some(year) = args.end_year {
        generation.end_year = year;
    }
    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }
    config.validate()
}

#[derive(Debug)]
struct GenerateOutcome {
    output_dir: PathBuf,
    summary: DatasetSummary,
    normalized: Option<NormalizeReport>,
}

fn run_generate(mut config: GridsetConfig, args: &GenerateArgs) -> Result<GenerateOutcome> {
    apply_overrides(&mut config, args)?;
    let output_dir = config.output.directory.clone();
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("unable to create output directory {}", output_dir.display()))?;

    let mut generator = GridGenerator::new(config.generation)?;
    info!(
        target_assets = generator.settings().target_assets(),
        "generating energy grid dataset"
    );
    let dataset = generator.generate()?;
    info!(assets = dataset.total_assets(), "energy grid dataset generated");
    let summary = dataset
        .write_all(&output_dir)
        .with_context(|| format!("failed to write dataset to {}", output_dir.display()))?;

    let normalized = if args.normalize {
        Some(run_normalize(&GridDataset::lines_path(&output_dir))?)
    } else {
        None
    };

    Ok(GenerateOutcome {
        output_dir,
        summary,
        normalized,
    })
}

fn run_normalize(path: &Path) -> Result<NormalizeReport> {
    normalize_lines(path).with_context(|| format!("failed to normalize {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_args(dir: &Path) -> GenerateArgs {
        GenerateArgs {
            output_dir: Some(dir.to_path_buf()),
            seed: Some(7),
            substations: Some(4),
            transformers: Some(6),
            lines: Some(10),
            measurements: Some(3),
            ..GenerateArgs::default()
        }
    }

    #[test]
    fn cli_parses_generate_overrides() {
        let cli = Cli::try_parse_from([
            "gridset",
            "generate",
            "--lines",
            "5",
            "--seed",
            "1",
            "--normalize",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.lines, Some(5));
                assert_eq!(args.seed, Some(1));
                assert!(args.normalize);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn normalize_defaults_to_lines_csv() {
        let cli = Cli::try_parse_from(["gridset", "normalize-lines"]).unwrap();
        match cli.command {
            Some(Commands::NormalizeLines(args)) => {
                assert_eq!(args.input, PathBuf::from("lines.csv"))
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn overrides_replace_configured_values() {
        let mut config = GridsetConfig::default();
        let dir = PathBuf::from("out");
        apply_overrides(&mut config, &small_args(&dir)).unwrap();
        assert_eq!(config.generation.substation_count, 4);
        assert_eq!(config.generation.transformer_count, 6);
        assert_eq!(config.generation.line_count, 10);
        assert_eq!(config.generation.measurement_count, 3);
        assert_eq!(config.generation.seed, Some(7));
        assert_eq!(config.generation.start_year, 2000);
        assert_eq!(config.output.directory, dir);
    }

    #[test]
    fn overrides_are_validated() {
        let mut config = GridsetConfig::default();
        let args = GenerateArgs {
            start_year: Some(2030),
            end_year: Some(2010),
            ..GenerateArgs::default()
        };
        assert!(apply_overrides(&mut config, &args).is_err());
    }

    #[test]
    fn generate_writes_tables_and_optionally_normalizes() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dataset");
        let mut args = small_args(&out);
        args.normalize = true;

        let outcome = run_generate(GridsetConfig::default(), &args).unwrap();
        assert_eq!(outcome.summary.total_assets(), 4 + 6 + 10 + 3);
        for file in [
            "substations.csv",
            "transformers.csv",
            "lines.csv",
            "measurements.csv",
        ] {
            assert!(out.join(file).is_file(), "{file} should exist");
        }
        let report = outcome.normalized.expect("normalization ran");
        assert_eq!(report.rows, 10);
        let header = fs::read_to_string(out.join("lines.csv")).unwrap();
        assert!(header.lines().next().unwrap().ends_with("to_trf_id,to_sub_id"));
    }

    #[test]
    fn normalize_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.csv");
        let err = run_normalize(&path).unwrap_err();
        assert!(err.to_string().contains("lines.csv"));
    }
}
