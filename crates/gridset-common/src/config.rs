//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Shared primitives for the dataset tooling."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

fn default_substation_count() -> usize {
    50
}

fn default_transformer_count() -> usize {
    800
}

fn default_line_count() -> usize {
    2500
}

fn default_measurement_count() -> usize {
    1650
}

fn default_start_year() -> i32 {
    2000
}

fn default_end_year() -> i32 {
    2024
}

fn default_measurement_start_year() -> i32 {
    2015
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Primary configuration object for a dataset generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridsetConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where a [`GridsetConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: GridsetConfig,
    /// `None` when no file was found and built-in defaults are in effect.
    pub source: Option<PathBuf>,
}

impl GridsetConfig {
    pub const ENV_CONFIG_PATH: &str = "GRIDSET_CONFIG";

    /// Load configuration together with the effective source path.
    ///
    /// An explicit `GRIDSET_CONFIG` path must exist. Candidate paths are
    /// optional; when none of them exist the defaults are returned.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(LoadedConfig {
            config: Self::default(),
            source: None,
        })
    }

    /// Read and validate a single configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<GridsetConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.generation.validate()
    }
}

impl std::str::FromStr for GridsetConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: GridsetConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Entity counts, installation year windows and the optional RNG seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_substation_count")]
    pub substation_count: usize,
    #[serde(default = "default_transformer_count")]
    pub transformer_count: usize,
    #[serde(default = "default_line_count")]
    pub line_count: usize,
    #[serde(default = "default_measurement_count")]
    pub measurement_count: usize,
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_end_year")]
    pub end_year: i32,
    /// Earliest year for measurement point installs; kept inside
    /// `start_year..=end_year`.
    #[serde(default = "default_measurement_start_year")]
    pub measurement_start_year: i32,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            substation_count: default_substation_count(),
            transformer_count: default_transformer_count(),
            line_count: default_line_count(),
            measurement_count: default_measurement_count(),
            start_year: default_start_year(),
            end_year: default_end_year(),
            measurement_start_year: default_measurement_start_year(),
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Number of assets requested before the measurement cap is applied.
    pub fn target_assets(&self) -> usize {
        self.substation_count
            .saturating_add(self.transformer_count)
            .saturating_add(self.line_count)
            .saturating_add(self.measurement_count)
    }

    /// Installation year window for substations, transformers and lines.
    pub fn infrastructure_years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    /// Installation year window for measurement points.
    pub fn measurement_years(&self) -> RangeInclusive<i32> {
        let start = self
            .measurement_start_year
            .max(self.start_year)
            .min(self.end_year);
        start..=self.end_year
    }

    pub fn validate(&self) -> Result<()> {
        for (label, year) in [
            ("start_year", self.start_year),
            ("end_year", self.end_year),
            ("measurement_start_year", self.measurement_start_year),
        ] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(anyhow!(
                    "{} {} is outside the supported range {}..={}",
                    label,
                    year,
                    MIN_YEAR,
                    MAX_YEAR
                ));
            }
        }
        if self.start_year > self.end_year {
            return Err(anyhow!(
                "start_year {} must not be after end_year {}",
                self.start_year,
                self.end_year
            ));
        }
        if self.transformer_count > 0 && self.substation_count == 0 {
            return Err(anyhow!(
                "transformers require at least one substation to attach to"
            ));
        }
        let endpoints = self.substation_count.saturating_add(self.transformer_count);
        if self.line_count > 0 && endpoints < 2 {
            return Err(anyhow!(
                "lines require at least two endpoints, found {}",
                endpoints
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// When set, a daily rolling JSON log is written here as well.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            directory: None,
            file_prefix: None,
        }
    }
}
