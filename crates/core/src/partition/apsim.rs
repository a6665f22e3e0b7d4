//! k·LAI-proportional partitioning (APSIM)
//!
//! # Scientific References
//!
//! - Carberry, P.S., Adiku, S.G.K., `McCown`, R.L., Keating, B.A. (1996).
//!   "Application of the APSIM cropping systems model to intercropping
//!   systems" In: Dynamics of roots and nitrogen in cropping systems of the
//!   semi-arid tropics. JIRCAS, pp. 637-648

use super::canopy::StandAlone;
use super::r#trait::CanopyPartition;
use crate::core_types::species::{DescriptorLayout, Species};
use crate::error::LightResult;
use tracing::debug;

/// Canopy interception shared in proportion to each species' k·LAI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApsimModel;

impl ApsimModel {
    pub const NAME: &'static str = "APSIM";
}

impl CanopyPartition for ApsimModel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor_layout(&self) -> DescriptorLayout {
        DescriptorLayout::ExtinctionLai
    }

    fn partition(&self, species: &[Species]) -> LightResult<Vec<f64>> {
        Ok(apsim_interception(species))
    }
}

/// Per-species interception proportional to k·LAI
///
/// Species that intercept nothing on their own (LAI = 0) receive 0. The
/// allocations sum to the canopy interception whenever any species has
/// leaves; an empty list yields an empty result.
pub fn apsim_interception(species: &[Species]) -> Vec<f64> {
    let stand_alone = StandAlone::from_species(species);
    let interception: Vec<f64> = stand_alone
        .interception
        .iter()
        .zip(&stand_alone.k_lai)
        .map(|(&alone, &k_lai)| {
            if alone > 0.0 {
                stand_alone.canopy_interception * k_lai / stand_alone.k_lai_sum
            } else {
                0.0
            }
        })
        .collect();

    debug!(
        "APSIM partition: {} species, canopy interception {:.6}",
        species.len(),
        stand_alone.canopy_interception
    );
    interception
}
