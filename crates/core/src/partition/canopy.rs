//! Stand-alone quantities shared by the daily partitioning models

use crate::core_types::species::Species;

/// Per-species quantities if each species grew without competitors, plus the
/// aggregate interception of the whole canopy
#[derive(Debug, Clone)]
pub(crate) struct StandAlone {
    /// exp(−k·LAI) per species
    pub(crate) transmittance: Vec<f64>,
    /// 1 − exp(−k·LAI) per species
    pub(crate) interception: Vec<f64>,
    /// k·LAI per species
    pub(crate) k_lai: Vec<f64>,
    /// Σ k·LAI
    pub(crate) k_lai_sum: f64,
    /// 1 − Π exp(−k·LAI)
    pub(crate) canopy_interception: f64,
}

impl StandAlone {
    pub(crate) fn from_species(species: &[Species]) -> Self {
        let transmittance: Vec<f64> = species
            .iter()
            .map(Species::stand_alone_transmittance)
            .collect();
        let interception = transmittance.iter().map(|t| 1.0 - t).collect();
        let k_lai: Vec<f64> = species.iter().map(Species::k_lai).collect();
        let k_lai_sum = k_lai.iter().sum();
        let canopy_transmittance = transmittance.iter().product::<f64>();
        Self {
            transmittance,
            interception,
            k_lai,
            k_lai_sum,
            canopy_interception: 1.0 - canopy_transmittance,
        }
    }

    /// Transmittance through every species except `skip`
    pub(crate) fn transmittance_of_others(&self, skip: usize) -> f64 {
        self.transmittance
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != skip)
            .map(|(_, t)| t)
            .product()
    }
}

/// Aggregate interception of a mixed canopy, `1 − Π exp(−k_i·LAI_i)`
///
/// Upper bound on the sum of any model's per-species allocation.
pub fn canopy_interception(species: &[Species]) -> f64 {
    1.0 - species
        .iter()
        .map(Species::stand_alone_transmittance)
        .product::<f64>()
}
