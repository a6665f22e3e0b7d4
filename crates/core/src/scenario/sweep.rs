//! LAI sweeps: one model evaluated over a growing mixed canopy
//!
//! Every species keeps a fixed share of the total LAI while the total runs
//! from a minimum to a maximum. The same sweep run through two models gives
//! the pointwise model comparison used when contrasting partition laws.

use super::linspace;
use crate::core_types::species::Species;
use crate::error::{ensure, LightError, LightResult};
use crate::partition::CanopyPartition;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Range and resolution of a total-LAI sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaiSweep {
    /// Total LAI at the first point
    pub min_total_lai: f64,
    /// Total LAI at the last point
    pub max_total_lai: f64,
    /// Number of sweep points, endpoints included
    pub points: usize,
}

impl LaiSweep {
    pub fn new(min_total_lai: f64, max_total_lai: f64, points: usize) -> LightResult<Self> {
        let sweep = Self {
            min_total_lai,
            max_total_lai,
            points,
        };
        sweep.validate()?;
        Ok(sweep)
    }

    pub fn validate(&self) -> LightResult<()> {
        ensure(
            self.min_total_lai >= 0.0 && self.min_total_lai.is_finite(),
            "minimum total LAI",
            self.min_total_lai,
            "[0, inf)",
        )?;
        ensure(
            self.max_total_lai >= self.min_total_lai && self.max_total_lai.is_finite(),
            "maximum total LAI",
            self.max_total_lai,
            "[minimum total LAI, inf)",
        )?;
        ensure(
            self.points > 0,
            "sweep points",
            self.points as f64,
            "[1, inf)",
        )
    }

    /// LAI series of a species holding `share` of the total
    pub fn species_lai(&self, share: f64) -> Vec<f64> {
        linspace(
            self.min_total_lai * share,
            self.max_total_lai * share,
            self.points,
        )
    }
}

impl Default for LaiSweep {
    fn default() -> Self {
        Self {
            min_total_lai: 0.01,
            max_total_lai: 7.0,
            points: 10,
        }
    }
}

/// Fixed traits of one species in a sweep; only its LAI varies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTemplate {
    pub extinction_coefficient: f64,
    pub height: f64,
    /// Fraction of the total LAI carried by this species
    pub lai_share: f64,
    /// Needed only by the sub-daily model
    #[serde(default)]
    pub leaf_angle_ratio: Option<f64>,
}

impl SpeciesTemplate {
    pub fn new(extinction_coefficient: f64, height: f64, lai_share: f64) -> Self {
        Self {
            extinction_coefficient,
            height,
            lai_share,
            leaf_angle_ratio: None,
        }
    }

    #[must_use]
    pub fn with_leaf_angle_ratio(mut self, x_ratio: f64) -> Self {
        self.leaf_angle_ratio = Some(x_ratio);
        self
    }

    /// The species at a given LAI
    pub fn at_lai(&self, leaf_area_index: f64) -> LightResult<Species> {
        let species = Species::new(self.extinction_coefficient, leaf_area_index, self.height)?;
        match self.leaf_angle_ratio {
            Some(x_ratio) => species.with_leaf_angle_ratio(x_ratio),
            None => Ok(species),
        }
    }
}

/// Interception of every species at every sweep point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// Summed LAI of all species at each point
    pub total_lai: Vec<f64>,
    /// `interception[species][point]`
    pub interception: Vec<Vec<f64>>,
}

impl SweepResult {
    pub fn species_count(&self) -> usize {
        self.interception.len()
    }

    /// Summed interception of all species at each point
    pub fn canopy_total(&self) -> Vec<f64> {
        (0..self.total_lai.len())
            .map(|p| self.interception.iter().map(|series| series[p]).sum())
            .collect()
    }

    /// Pointwise `self − other`, per species
    ///
    /// # Errors
    /// Both sweeps must cover the same species count and points.
    pub fn difference(&self, other: &SweepResult) -> LightResult<Vec<Vec<f64>>> {
        if other.species_count() != self.species_count() {
            return Err(LightError::LengthMismatch {
                what: "compared sweep species",
                expected: self.species_count(),
                found: other.species_count(),
            });
        }
        if other.total_lai.len() != self.total_lai.len() {
            return Err(LightError::LengthMismatch {
                what: "compared sweep points",
                expected: self.total_lai.len(),
                found: other.total_lai.len(),
            });
        }
        Ok(self
            .interception
            .iter()
            .zip(&other.interception)
            .map(|(mine, theirs)| mine.iter().zip(theirs).map(|(a, b)| a - b).collect())
            .collect())
    }
}

/// Evaluate `model` at every point of `sweep`
///
/// # Arguments
///
/// * `model` - Any partitioning model
/// * `templates` - Species traits and LAI shares, in model input order
/// * `sweep` - Total LAI range and resolution
///
/// # Returns
///
/// Per-species interception series in point order
pub fn run_sweep(
    model: &dyn CanopyPartition,
    templates: &[SpeciesTemplate],
    sweep: &LaiSweep,
) -> LightResult<SweepResult> {
    sweep.validate()?;
    if templates.is_empty() {
        return Err(LightError::Empty("species templates"));
    }
    for template in templates {
        ensure(
            template.lai_share > 0.0 && template.lai_share.is_finite(),
            "LAI share",
            template.lai_share,
            "(0, inf)",
        )?;
    }

    let lai_series: Vec<Vec<f64>> = templates
        .iter()
        .map(|t| sweep.species_lai(t.lai_share))
        .collect();
    let total_lai: Vec<f64> = (0..sweep.points)
        .map(|p| lai_series.iter().map(|series| series[p]).sum())
        .collect();

    debug!(
        "Sweeping {} model: {} species over {} points, total LAI {:.3} to {:.3}",
        model.name(),
        templates.len(),
        sweep.points,
        sweep.min_total_lai,
        sweep.max_total_lai
    );

    let by_point = (0..sweep.points)
        .into_par_iter()
        .map(|p| {
            let species = templates
                .iter()
                .zip(&lai_series)
                .map(|(template, series)| template.at_lai(series[p]))
                .collect::<LightResult<Vec<Species>>>()?;
            model.partition(&species)
        })
        .collect::<LightResult<Vec<Vec<f64>>>>()?;

    let interception = (0..templates.len())
        .map(|s| by_point.iter().map(|point| point[s]).collect())
        .collect();

    Ok(SweepResult {
        total_lai,
        interception,
    })
}
