//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic grid dataset generation and table rewriting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use gridset_common::GenerationConfig;
use rand::prelude::*;
use rand_distr::WeightedIndex;
use tracing::{debug, warn};

use crate::catalog::{
    self, AssetKind, AssetStatus, LineType, MeasurementKind, StatusWeights, SubstationType,
    TransformerType, SUBSTATION_TIERS,
};
use crate::dataset::GridDataset;
use crate::dates::DateSampler;
use crate::errors::{Result, SynthError};
use crate::ids::generate_id;
use crate::model::{Endpoint, Line, MeasurementPoint, Substation, Transformer};

/// Upper bound on redraws of a line's `to` endpoint when it equals `from`.
pub const MAX_ENDPOINT_REDRAWS: usize = 1000;

/// Discrete status draw over an explicit weight table.
#[derive(Debug, Clone)]
struct StatusPicker {
    statuses: Vec<AssetStatus>,
    index: WeightedIndex<u32>,
}

impl StatusPicker {
    fn new(table: StatusWeights) -> Result<Self> {
        let index = WeightedIndex::new(table.iter().map(|(_, weight)| *weight))
            .map_err(|err| SynthError::InvalidConfig(format!("status weights: {err}")))?;
        Ok(Self {
            statuses: table.iter().map(|(status, _)| *status).collect(),
            index,
        })
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> AssetStatus {
        self.statuses[self.index.sample(rng)]
    }
}

/// Uniform pick from a fixed, non-empty catalog slice.
fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Produces the four related asset collections from one RNG stream.
#[derive(Debug)]
pub struct GridGenerator {
    settings: GenerationConfig,
    rng: StdRng,
    infrastructure_dates: DateSampler,
    measurement_dates: DateSampler,
    substation_status: StatusPicker,
    transformer_status: StatusPicker,
    line_status: StatusPicker,
}

impl GridGenerator {
    /// Build a generator; a configured seed makes the dataset reproducible.
    pub fn new(settings: GenerationConfig) -> Result<Self> {
        settings
            .validate()
            .map_err(|err| SynthError::InvalidConfig(err.to_string()))?;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            infrastructure_dates: DateSampler::new(settings.infrastructure_years())?,
            measurement_dates: DateSampler::new(settings.measurement_years())?,
            substation_status: StatusPicker::new(catalog::SUBSTATION_STATUS)?,
            transformer_status: StatusPicker::new(catalog::TRANSFORMER_STATUS)?,
            line_status: StatusPicker::new(catalog::LINE_STATUS)?,
            settings,
            rng,
        })
    }

    pub fn settings(&self) -> &GenerationConfig {
        &self.settings
    }

    /// Generate every collection in dependency order.
    pub fn generate(&mut self) -> Result<GridDataset> {
        let substations = self.substations();
        let transformers = self.transformers(&substations)?;
        let lines = self.lines(&substations, &transformers)?;
        let measurement_points = self.measurement_points(&transformers);
        Ok(GridDataset {
            substations,
            transformers,
            lines,
            measurement_points,
        })
    }

    pub fn substations(&mut self) -> Vec<Substation> {
        let count = self.settings.substation_count;
        debug!(count, "generating substations");
        (0..count)
            .map(|i| Substation {
                id: generate_id(&mut self.rng, AssetKind::Substation),
                name: format!("Substation_{}", i + 1),
                kind: pick(&mut self.rng, SubstationType::all()),
                voltage_level: pick(&mut self.rng, SUBSTATION_TIERS),
                installed: self.infrastructure_dates.sample(&mut self.rng),
                capacity_mva: self.rng.gen_range(catalog::SUBSTATION_CAPACITY_MVA),
                status: self.substation_status.pick(&mut self.rng),
            })
            .collect()
    }

    /// Attach each transformer to a parent drawn with replacement and step
    /// its secondary side one tier below the parent's voltage.
    pub fn transformers(&mut self, substations: &[Substation]) -> Result<Vec<Transformer>> {
        let count = self.settings.transformer_count;
        debug!(count, parents = substations.len(), "generating transformers");
        let mut transformers = Vec::with_capacity(count);
        for i in 0..count {
            let parent = substations
                .choose(&mut self.rng)
                .ok_or(SynthError::EmptyParentPool)?;
            let primary = parent.voltage_level;
            transformers.push(Transformer {
                id: generate_id(&mut self.rng, AssetKind::Transformer),
                name: format!("Transformer_{}", i + 1),
                kind: pick(&mut self.rng, TransformerType::all()),
                primary_voltage: primary,
                secondary_voltage: primary.step_down(),
                rating_mva: self.rng.gen_range(catalog::TRANSFORMER_RATING_MVA),
                installed: self.infrastructure_dates.sample(&mut self.rng),
                substation_id: parent.id.clone(),
                efficiency: catalog::round_to(
                    self.rng.gen_range(catalog::TRANSFORMER_EFFICIENCY),
                    3,
                ),
                status: self.transformer_status.pick(&mut self.rng),
            });
        }
        Ok(transformers)
    }

    /// Connect endpoints drawn uniformly from substations and transformers.
    ///
    /// A `to` endpoint equal to `from` is redrawn, at most
    /// [`MAX_ENDPOINT_REDRAWS`] times.
    pub fn lines(
        &mut self,
        substations: &[Substation],
        transformers: &[Transformer],
    ) -> Result<Vec<Line>> {
        let count = self.settings.line_count;
        let pool: Vec<Endpoint<'_>> = substations
            .iter()
            .map(Endpoint::Substation)
            .chain(transformers.iter().map(Endpoint::Transformer))
            .collect();
        debug!(count, endpoints = pool.len(), "generating lines");
        if count > 0 && pool.len() < 2 {
            return Err(SynthError::InsufficientEndpoints {
                available: pool.len(),
            });
        }

        let mut lines = Vec::with_capacity(count);
        for i in 0..count {
            let from = pick(&mut self.rng, &pool);
            let mut to = pick(&mut self.rng, &pool);
            let mut redraws = 0;
            while to.id() == from.id() {
                if redraws == MAX_ENDPOINT_REDRAWS {
                    return Err(SynthError::EndpointRedrawExhausted { attempts: redraws });
                }
                to = pick(&mut self.rng, &pool);
                redraws += 1;
            }
            lines.push(Line {
                id: generate_id(&mut self.rng, AssetKind::Line),
                name: format!("Line_{}", i + 1),
                kind: pick(&mut self.rng, LineType::all()),
                from_id: from.id().to_owned(),
                to_id: to.id().to_owned(),
                length_km: catalog::round_to(self.rng.gen_range(catalog::LINE_LENGTH_KM), 2),
                voltage: from.outgoing_voltage(),
                installed: self.infrastructure_dates.sample(&mut self.rng),
                capacity_mw: self.rng.gen_range(catalog::LINE_CAPACITY_MW),
                status: self.line_status.pick(&mut self.rng),
            });
        }
        Ok(lines)
    }

    /// Monitor distinct transformers, sampled without replacement. The
    /// configured count is capped at the number of transformers.
    pub fn measurement_points(&mut self, transformers: &[Transformer]) -> Vec<MeasurementPoint> {
        let requested = self.settings.measurement_count;
        let count = requested.min(transformers.len());
        if count < requested {
            warn!(
                requested,
                available = transformers.len(),
                "measurement count capped by transformer pool"
            );
        }
        debug!(count, "generating measurement points");
        let monitored: Vec<&Transformer> =
            transformers.choose_multiple(&mut self.rng, count).collect();
        monitored
            .into_iter()
            .enumerate()
            .map(|(i, transformer)| MeasurementPoint {
                id: generate_id(&mut self.rng, AssetKind::MeasurementPoint),
                name: format!("Measurement_{}", i + 1),
                transformer_id: transformer.id.clone(),
                kind: pick(&mut self.rng, MeasurementKind::all()),
                installed: self.measurement_dates.sample(&mut self.rng),
                sampling_rate_hz: pick(&mut self.rng, catalog::SAMPLING_RATES_HZ),
                accuracy_percent: catalog::round_to(
                    self.rng.gen_range(catalog::ACCURACY_PERCENT),
                    2,
                ),
                status: AssetStatus::Active,
            })
            .collect()
    }
}
