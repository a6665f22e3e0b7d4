//! Two-species height-fraction partitioning (Wallace)
//!
//! # Scientific References
//!
//! - Wallace, J.S. (1997). "Evaporation and radiation interception by
//!   neighbouring plants" Quarterly Journal of the Royal Meteorological
//!   Society, 123, 1885-1905

use super::r#trait::CanopyPartition;
use crate::core_types::species::{DescriptorLayout, Species};
use crate::error::{LightError, LightResult};
use tracing::debug;

/// Pairwise partition interpolating each species between its suppressed and
/// stand-alone interception by its share of the summed height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallaceModel;

impl WallaceModel {
    pub const NAME: &'static str = "Wallace";
}

impl CanopyPartition for WallaceModel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor_layout(&self) -> DescriptorLayout {
        DescriptorLayout::ExtinctionLaiHeight
    }

    fn partition(&self, species: &[Species]) -> LightResult<Vec<f64>> {
        let [first, second] = species else {
            return Err(LightError::SpeciesCount {
                model: Self::NAME,
                expected: "exactly 2",
                found: species.len(),
            });
        };
        let (i1, i2) = wallace_interception(first, second);
        Ok(vec![i1, i2])
    }
}

/// Radiation intercepted by each of two competing species
///
/// `I_1 = S_1 + h_1/(h_1+h_2) · (D_1 − S_1)`, with `D` the stand-alone and
/// `S_1 = D_1 · T_2` the suppressed interception; symmetrically for species 2.
pub fn wallace_interception(first: &Species, second: &Species) -> (f64, f64) {
    let transmittance1 = first.stand_alone_transmittance();
    let transmittance2 = second.stand_alone_transmittance();
    let dominant1 = 1.0 - transmittance1;
    let dominant2 = 1.0 - transmittance2;

    let height_fraction1 = first.height() / (first.height() + second.height());
    let height_fraction2 = second.height() / (first.height() + second.height());

    let suppressed1 = dominant1 * transmittance2;
    let suppressed2 = dominant2 * transmittance1;

    let intercepted1 = suppressed1 + height_fraction1 * (dominant1 - suppressed1);
    let intercepted2 = suppressed2 + height_fraction2 * (dominant2 - suppressed2);

    debug!(
        "Wallace partition: {:.6} / {:.6}",
        intercepted1, intercepted2
    );
    (intercepted1, intercepted2)
}
