//! Numerical and atmospheric configuration
//!
//! Presets here play the same role as quality presets elsewhere: they fix the
//! accuracy/cost trade-off of the angular integration and the atmosphere the
//! sub-daily model is evaluated under.

use crate::core_types::units::{Degrees, Kilopascals};
use crate::error::{ensure, LightError, LightResult};
use serde::{Deserialize, Serialize};

/// Resolution of the midpoint rule used for the diffuse extinction coefficient
///
/// The default of 90 steps over 0-90° keeps the coefficient within 1e-4 of a
/// converged integral for LAI >= 0.5. Very sparse canopies converge slower and
/// may need more steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffuseIntegration {
    /// Number of equal zenith-angle intervals between 0 and π/2
    pub steps: usize,
}

impl DiffuseIntegration {
    pub const DEFAULT_STEPS: usize = 90;

    /// Fail on a resolution that cannot integrate anything
    pub fn validate(self) -> LightResult<()> {
        ensure(
            self.steps > 0,
            "diffuse integration steps",
            self.steps as f64,
            "[1, inf)",
        )
    }
}

impl Default for DiffuseIntegration {
    fn default() -> Self {
        Self {
            steps: Self::DEFAULT_STEPS,
        }
    }
}

/// Atmosphere, leaf optics and angular sampling for the sub-daily model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubDailyConfig {
    /// Atmospheric transmittance [0-1], 0.75 for a clear sky
    pub atmospheric_transmittance: f64,
    /// Atmospheric pressure (kPa)
    pub atmospheric_pressure: Kilopascals,
    /// Leaf transmittance [0-1]; enters the canopy attenuation as its square root
    pub leaf_transmittance: f64,
    /// Solar zenith angles sampled over the day
    pub zenith_angles: Vec<Degrees>,
    /// Angles whose total flux fraction falls below this contribute nothing
    pub min_flux_fraction: f64,
    /// Resolution of the diffuse extinction integral
    pub diffuse: DiffuseIntegration,
}

impl SubDailyConfig {
    /// Default threshold below which an angle is treated as carrying no flux
    pub const DEFAULT_MIN_FLUX_FRACTION: f64 = 1e-9;

    /// Clear sky at sea level with 19 zenith angles from 0° to 90° in 5° steps
    pub fn clear_sky() -> Self {
        Self {
            atmospheric_transmittance: 0.75,
            atmospheric_pressure: Kilopascals::SEA_LEVEL,
            leaf_transmittance: 0.8,
            zenith_angles: evenly_spaced_zenith_angles(19),
            min_flux_fraction: Self::DEFAULT_MIN_FLUX_FRACTION,
            diffuse: DiffuseIntegration::default(),
        }
    }

    #[must_use]
    pub fn with_atmospheric_transmittance(mut self, transmittance: f64) -> Self {
        self.atmospheric_transmittance = transmittance;
        self
    }

    #[must_use]
    pub fn with_atmospheric_pressure(mut self, pressure: Kilopascals) -> Self {
        self.atmospheric_pressure = pressure;
        self
    }

    #[must_use]
    pub fn with_leaf_transmittance(mut self, transmittance: f64) -> Self {
        self.leaf_transmittance = transmittance;
        self
    }

    #[must_use]
    pub fn with_zenith_angles(mut self, angles: Vec<Degrees>) -> Self {
        self.zenith_angles = angles;
        self
    }

    #[must_use]
    pub fn with_min_flux_fraction(mut self, threshold: f64) -> Self {
        self.min_flux_fraction = threshold;
        self
    }

    #[must_use]
    pub fn with_diffuse_integration(mut self, diffuse: DiffuseIntegration) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Check every field against its physical envelope
    pub fn validate(&self) -> LightResult<()> {
        ensure(
            (0.0..=1.0).contains(&self.atmospheric_transmittance),
            "atmospheric transmittance",
            self.atmospheric_transmittance,
            "[0, 1]",
        )?;
        let pressure = *self.atmospheric_pressure;
        ensure(
            pressure > *Kilopascals::MIN_SUPPORTED && pressure <= *Kilopascals::SEA_LEVEL,
            "atmospheric pressure",
            pressure,
            "(38, 101.3] kPa",
        )?;
        ensure(
            (0.0..=1.0).contains(&self.leaf_transmittance),
            "leaf transmittance",
            self.leaf_transmittance,
            "[0, 1]",
        )?;
        ensure(
            self.min_flux_fraction >= 0.0 && self.min_flux_fraction.is_finite(),
            "minimum flux fraction",
            self.min_flux_fraction,
            "[0, inf)",
        )?;
        if self.zenith_angles.is_empty() {
            return Err(LightError::Empty("zenith angles"));
        }
        for angle in &self.zenith_angles {
            ensure(
                (0.0..=90.0).contains(&angle.value()),
                "solar zenith angle",
                angle.value(),
                "[0, 90] deg",
            )?;
        }
        self.diffuse.validate()
    }
}

impl Default for SubDailyConfig {
    fn default() -> Self {
        Self::clear_sky()
    }
}

/// `count` zenith angles spread evenly over [0°, 90°], both ends included
pub fn evenly_spaced_zenith_angles(count: usize) -> Vec<Degrees> {
    crate::scenario::linspace(0.0, 90.0, count)
        .into_iter()
        .map(Degrees::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_diffuse_resolution() {
        assert_eq!(DiffuseIntegration::default().steps, 90);
        assert!(DiffuseIntegration { steps: 0 }.validate().is_err());
    }

    #[test]
    fn test_clear_sky_preset() {
        let config = SubDailyConfig::clear_sky();
        assert_eq!(config.atmospheric_transmittance, 0.75);
        assert_eq!(config.leaf_transmittance, 0.8);
        assert_eq!(config.zenith_angles.len(), 19);
        assert_eq!(config.zenith_angles[0], Degrees::ZENITH);
        assert_eq!(config.zenith_angles[1], Degrees::new(5.0));
        assert_eq!(config.zenith_angles[18], Degrees::HORIZON);
        assert!(config.validate().is_ok());
        assert_eq!(config, SubDailyConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let base = SubDailyConfig::clear_sky();
        assert!(base
            .clone()
            .with_atmospheric_transmittance(1.5)
            .validate()
            .is_err());
        assert!(base
            .clone()
            .with_atmospheric_pressure(Kilopascals::new(30.0))
            .validate()
            .is_err());
        assert!(base
            .clone()
            .with_leaf_transmittance(-0.1)
            .validate()
            .is_err());
        assert!(base
            .clone()
            .with_zenith_angles(vec![Degrees::new(95.0)])
            .validate()
            .is_err());
        assert_eq!(
            base.with_zenith_angles(Vec::new()).validate(),
            Err(LightError::Empty("zenith angles"))
        );
    }
}
