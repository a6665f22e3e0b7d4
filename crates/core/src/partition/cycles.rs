//! Height-weighted multi-species partitioning (Cycles)
//!
//! Each species' share of the canopy interception is its k·LAI share,
//! reweighted by a factor between two extremes:
//! - dominant: the species intercepts first, as if it grew alone
//! - suppressed: the species only receives what every other species let through
//!
//! Where a species falls between the extremes depends on its height relative
//! to the canopy mean. Weights are renormalised so the species allocations sum
//! to the aggregate canopy interception.
//!
//! # Scientific References
//!
//! - Camargo, G.G.T. (2014). Ph.D. Dissertation, Penn State University

use super::canopy::StandAlone;
use super::r#trait::CanopyPartition;
use crate::core_types::species::{DescriptorLayout, Species};
use crate::error::{LightError, LightResult};
use crate::physics::height_weight;
use tracing::debug;

/// Iterative height-weighted partition for any number of species
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CyclesModel;

impl CyclesModel {
    pub const NAME: &'static str = "Cycles";
}

impl CanopyPartition for CyclesModel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor_layout(&self) -> DescriptorLayout {
        DescriptorLayout::ExtinctionLaiHeight
    }

    fn partition(&self, species: &[Species]) -> LightResult<Vec<f64>> {
        cycles_interception(species)
    }
}

/// Per-species radiation interception with height dominance weighting
///
/// # Errors
/// Fails on an empty species list and on any species with k·LAI = 0, whose
/// weighting factors are undefined.
///
/// Also fails with [`LightError::WeightUnderflow`] when a weighting factor
/// rounds to zero in double precision. This happens when a species' own
/// transmittance rounds to 1 (k·LAI below about 1e-16) or when its
/// competitors together transmit nothing (their summed k·LAI above about 745).
pub fn cycles_interception(species: &[Species]) -> LightResult<Vec<f64>> {
    let n_species = species.len();
    if n_species == 0 {
        return Err(LightError::SpeciesCount {
            model: CyclesModel::NAME,
            expected: "at least 1",
            found: 0,
        });
    }
    if let Some(index) = species.iter().position(|s| s.k_lai() == 0.0) {
        return Err(LightError::ZeroLightCapture { index });
    }

    let stand_alone = StandAlone::from_species(species);
    let total_interception = stand_alone.canopy_interception;
    let height_sum: f64 = species.iter().map(Species::height).sum();

    let mut weights = Vec::with_capacity(n_species);
    let mut k_lai_adjusted_sum = 0.0;
    for (i, s) in species.iter().enumerate() {
        let height_dominance = n_species as f64 * s.height() / height_sum;

        // Interception once every other species has taken its share first
        let suppressed_interception =
            stand_alone.interception[i] * stand_alone.transmittance_of_others(i);

        if stand_alone.interception[i] == 0.0 {
            return Err(LightError::WeightUnderflow {
                index: i,
                factor: "dominant",
            });
        }
        if suppressed_interception == 0.0 {
            return Err(LightError::WeightUnderflow {
                index: i,
                factor: "suppressed",
            });
        }

        let k_lai_ratio = stand_alone.k_lai_sum / stand_alone.k_lai[i];
        let dominant_factor = stand_alone.interception[i] / total_interception * k_lai_ratio;
        let suppressed_factor = suppressed_interception / total_interception * k_lai_ratio;

        let weight = height_weight(
            height_dominance,
            dominant_factor,
            suppressed_factor,
            n_species,
        )?;
        k_lai_adjusted_sum += s.extinction_coefficient() * s.leaf_area_index() * weight;
        weights.push(weight);
    }

    let interception: Vec<f64> = weights
        .iter()
        .zip(&stand_alone.k_lai)
        .map(|(weight, k_lai)| {
            let weight_adjusted = weight / k_lai_adjusted_sum * stand_alone.k_lai_sum;
            total_interception * weight_adjusted * k_lai / stand_alone.k_lai_sum
        })
        .collect();

    debug!(
        "Cycles partition: {} species, canopy interception {:.6}",
        n_species, total_interception
    );
    Ok(interception)
}
