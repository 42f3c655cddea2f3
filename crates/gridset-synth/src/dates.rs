//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic grid dataset generation and table rewriting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use rand::Rng;

use crate::errors::{Result, SynthError};

/// Uniform sampler over every calendar day between Jan 1 of the first year
/// and Dec 31 of the last year, inclusive.
#[derive(Debug, Clone, Copy)]
pub struct DateSampler {
    start: NaiveDate,
    span_days: i64,
}

impl DateSampler {
    pub fn new(years: RangeInclusive<i32>) -> Result<Self> {
        let (first, last) = (*years.start(), *years.end());
        if first > last {
            return Err(SynthError::InvalidConfig(format!(
                "year window {first}..={last} is empty"
            )));
        }
        let start = NaiveDate::from_ymd_opt(first, 1, 1)
            .ok_or_else(|| SynthError::InvalidConfig(format!("unsupported year {first}")))?;
        let end = NaiveDate::from_ymd_opt(last, 12, 31)
            .ok_or_else(|| SynthError::InvalidConfig(format!("unsupported year {last}")))?;
        Ok(Self {
            start,
            span_days: (end - start).num_days(),
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDate {
        let offset = rng.gen_range(0..=self.span_days);
        self.start + chrono::Duration::days(offset)
    }
}
