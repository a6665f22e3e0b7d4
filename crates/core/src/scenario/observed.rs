//! Measured mixture time series and model bias against them
//!
//! A series holds, per time step, each species' LAI, height and measured
//! light interception, with one fitted extinction coefficient per species.
//! Replaying it through a model and comparing with the measurements gives
//! the mean absolute bias of each species and of the whole mixture.
//!
//! # Scientific References
//!
//! - Barillot, R., Louarn, G., Escobar-Gutiérrez, A.J., Huynh, P.,
//!   Combes, D. (2011). "How good is the turbid medium-based approach for
//!   accounting for light partitioning in contrasted grass-legume
//!   intercropping systems?" Annals of Botany, 108, 1013-1024

use crate::core_types::species::Species;
use crate::error::{LightError, LightResult};
use crate::partition::CanopyPartition;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Measurements of one species over the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSeries {
    /// Fitted extinction coefficient, constant over time
    pub extinction_coefficient: f64,
    pub lai: Vec<f64>,
    pub height: Vec<f64>,
    /// Measured fraction of incoming radiation intercepted
    pub observed: Vec<f64>,
}

/// Time series of a measured species mixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureSeries {
    /// Time axis (e.g. thermal time, °C·day)
    pub time: Vec<f64>,
    pub species: Vec<SpeciesSeries>,
}

/// Mean absolute bias of a model against a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesBias {
    /// One value per species, in series order
    pub species: Vec<f64>,
    /// Bias of the summed mixture interception
    pub mixture: f64,
}

impl MixtureSeries {
    /// Check that every species column is aligned with the time axis
    pub fn validate(&self) -> LightResult<()> {
        if self.time.is_empty() {
            return Err(LightError::Empty("time series"));
        }
        if self.species.is_empty() {
            return Err(LightError::Empty("species series"));
        }
        let steps = self.time.len();
        for series in &self.species {
            for (what, column) in [
                ("species LAI series", &series.lai),
                ("species height series", &series.height),
                ("species observed series", &series.observed),
            ] {
                if column.len() != steps {
                    return Err(LightError::LengthMismatch {
                        what,
                        expected: steps,
                        found: column.len(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Species as measured at time step `step`
    fn species_at(&self, step: usize) -> LightResult<Vec<Species>> {
        self.species
            .iter()
            .map(|s| {
                let k = s.extinction_coefficient;
                Species::new(k, s.lai[step], s.height[step])
            })
            .collect()
    }

    /// Simulated interception, `[species][time step]`
    pub fn simulate(&self, model: &dyn CanopyPartition) -> LightResult<Vec<Vec<f64>>> {
        self.validate()?;
        let mut simulated: Vec<Vec<f64>> = (0..self.species.len())
            .map(|_| Vec::with_capacity(self.len()))
            .collect();
        for step in 0..self.len() {
            let shares = model.partition(&self.species_at(step)?)?;
            for (series, share) in simulated.iter_mut().zip(shares) {
                series.push(share);
            }
        }
        Ok(simulated)
    }

    /// Per-species and mixture mean absolute bias of `model`
    pub fn bias(&self, model: &dyn CanopyPartition) -> LightResult<SeriesBias> {
        let simulated = self.simulate(model)?;
        let species = simulated
            .iter()
            .zip(&self.species)
            .map(|(sim, series)| mean_absolute_bias(sim, &series.observed))
            .collect::<LightResult<Vec<f64>>>()?;

        let simulated_total = column_sums(&simulated, self.len());
        let observed: Vec<Vec<f64>> = self.species.iter().map(|s| s.observed.clone()).collect();
        let observed_total = column_sums(&observed, self.len());
        let mixture = mean_absolute_bias(&simulated_total, &observed_total)?;

        debug!(
            "{} bias over {} steps: species {:?}, mixture {:.4}",
            model.name(),
            self.len(),
            species,
            mixture
        );
        Ok(SeriesBias { species, mixture })
    }
}

fn column_sums(rows: &[Vec<f64>], len: usize) -> Vec<f64> {
    (0..len)
        .map(|t| rows.iter().map(|row| row[t]).sum())
        .collect()
}

/// Mean of |simulated − observed|
///
/// # Errors
/// Both series must be non-empty and of equal length.
pub fn mean_absolute_bias(simulated: &[f64], observed: &[f64]) -> LightResult<f64> {
    if observed.is_empty() {
        return Err(LightError::Empty("observed series"));
    }
    if simulated.len() != observed.len() {
        return Err(LightError::LengthMismatch {
            what: "simulated series",
            expected: observed.len(),
            found: simulated.len(),
        });
    }
    let total: f64 = simulated
        .iter()
        .zip(observed)
        .map(|(s, o)| (s - o).abs())
        .sum();
    Ok(total / observed.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{cycles_interception, CyclesModel};
    use approx::assert_abs_diff_eq;

    fn pea_wheat() -> MixtureSeries {
        MixtureSeries {
            time: vec![200.0, 600.0, 1000.0],
            species: vec![
                SpeciesSeries {
                    extinction_coefficient: 0.54,
                    lai: vec![0.2, 1.5, 3.0],
                    height: vec![0.1, 0.4, 0.8],
                    observed: vec![0.05, 0.30, 0.45],
                },
                SpeciesSeries {
                    extinction_coefficient: 0.51,
                    lai: vec![0.3, 1.2, 2.5],
                    height: vec![0.15, 0.5, 0.9],
                    observed: vec![0.07, 0.32, 0.48],
                },
            ],
        }
    }

    #[test]
    fn test_mean_absolute_bias() {
        let bias = mean_absolute_bias(&[0.1, 0.5, 0.3], &[0.2, 0.4, 0.3]).unwrap();
        assert_abs_diff_eq!(bias, 0.2 / 3.0, epsilon = 1e-12);
        assert!(mean_absolute_bias(&[], &[]).is_err());
        assert_eq!(
            mean_absolute_bias(&[0.1], &[0.1, 0.2]),
            Err(LightError::LengthMismatch {
                what: "simulated series",
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_simulate_matches_model_per_step() {
        let series = pea_wheat();
        let simulated = series.simulate(&CyclesModel).unwrap();
        assert_eq!(simulated.len(), 2);
        let step1 = cycles_interception(&series.species_at(1).unwrap()).unwrap();
        assert_eq!(simulated[0][1], step1[0]);
        assert_eq!(simulated[1][1], step1[1]);
    }

    #[test]
    fn test_bias_of_perfect_observations_is_zero() {
        let mut series = pea_wheat();
        let simulated = series.simulate(&CyclesModel).unwrap();
        for (s, sim) in series.species.iter_mut().zip(simulated) {
            s.observed = sim;
        }
        let bias = series.bias(&CyclesModel).unwrap();
        assert_eq!(bias.species, vec![0.0, 0.0]);
        assert_abs_diff_eq!(bias.mixture, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_misaligned_series_rejected() {
        let mut series = pea_wheat();
        series.species[1].height.pop();
        assert_eq!(
            series.simulate(&CyclesModel),
            Err(LightError::LengthMismatch {
                what: "species height series",
                expected: 3,
                found: 2
            })
        );
    }
}
