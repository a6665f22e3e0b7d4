//! Solar state at one sampled zenith angle

use crate::core_types::units::{Degrees, Kilopascals, Radians};
use crate::error::{ensure, LightResult};
use crate::physics::solar_geometry::{flux_fractions, FluxFractions};
use serde::{Deserialize, Serialize};

/// Sun position and atmosphere for a single angle sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarState {
    zenith: Degrees,
    pressure: Kilopascals,
    transmittance: f64,
}

impl SolarState {
    /// Create a validated solar state
    ///
    /// # Arguments
    /// * `zenith` - Solar zenith angle, [0°, 90°]
    /// * `pressure` - Atmospheric pressure, (38, 101.3] kPa
    /// * `transmittance` - Atmospheric transmittance, [0, 1]
    pub fn new(zenith: Degrees, pressure: Kilopascals, transmittance: f64) -> LightResult<Self> {
        ensure(
            (0.0..=90.0).contains(&zenith.value()),
            "solar zenith angle",
            zenith.value(),
            "[0, 90] deg",
        )?;
        ensure(
            pressure.value() > Kilopascals::MIN_SUPPORTED.value()
                && pressure.value() <= Kilopascals::SEA_LEVEL.value(),
            "atmospheric pressure",
            pressure.value(),
            "(38, 101.3] kPa",
        )?;
        ensure(
            (0.0..=1.0).contains(&transmittance),
            "atmospheric transmittance",
            transmittance,
            "[0, 1]",
        )?;
        Ok(Self {
            zenith,
            pressure,
            transmittance,
        })
    }

    #[inline]
    pub fn zenith(&self) -> Degrees {
        self.zenith
    }

    #[inline]
    pub fn zenith_radians(&self) -> Radians {
        self.zenith.to_radians()
    }

    #[inline]
    pub fn pressure(&self) -> Kilopascals {
        self.pressure
    }

    #[inline]
    pub fn transmittance(&self) -> f64 {
        self.transmittance
    }

    /// Beam and diffuse fractions of the incoming flux at this sun position
    pub fn flux(&self) -> LightResult<FluxFractions> {
        flux_fractions(*self.pressure, *self.zenith, self.transmittance)
    }
}
