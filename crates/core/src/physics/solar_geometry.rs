//! Clear-sky solar geometry
//!
//! Optical air mass and the beam/diffuse split of incoming shortwave flux as a
//! function of solar zenith angle, atmospheric pressure and atmospheric
//! transmittance.
//!
//! # Scientific References
//!
//! - Campbell, G.S., Norman, J.M. (1998). "An Introduction to Environmental
//!   Biophysics", 2nd ed. Springer, New York. Chapter 11, Eq. 11.8, 11.11-11.13

use crate::core_types::units::{Degrees, Kilopascals};
use crate::error::{ensure, LightResult};
use serde::{Deserialize, Serialize};

/// Fraction of the diffuse sky component relative to the attenuated beam
/// (Liu-Jordan coefficient, Campbell & Norman Eq. 11.13)
const DIFFUSE_SCATTER_FRACTION: f64 = 0.3;

/// Beam and diffuse components of incoming radiation, as fractions of the
/// flux at the top of the atmosphere on a horizontal surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FluxFractions {
    pub beam: f64,
    pub diffuse: f64,
}

impl FluxFractions {
    /// Beam plus diffuse
    #[inline]
    pub fn total(&self) -> f64 {
        self.beam + self.diffuse
    }
}

/// Ratio of slant path length through the atmosphere to zenith path length
///
/// m = p / (101.3 cos ψ)   (Campbell & Norman Eq. 11.12)
///
/// # Arguments
/// * `atm_pressure` - Atmospheric pressure (kPa), in (38, 101.3]
/// * `zenith_rad` - Solar zenith angle (rad), >= 0
pub fn optical_air_mass(atm_pressure: f64, zenith_rad: f64) -> LightResult<f64> {
    ensure(
        atm_pressure > *Kilopascals::MIN_SUPPORTED && atm_pressure <= *Kilopascals::SEA_LEVEL,
        "atmospheric pressure",
        atm_pressure,
        "(38, 101.3] kPa",
    )?;
    ensure(
        zenith_rad >= 0.0,
        "solar zenith angle",
        zenith_rad,
        "[0, inf) rad",
    )?;
    Ok(atm_pressure / (*Kilopascals::SEA_LEVEL * zenith_rad.cos()))
}

fn check_zenith_and_transmittance(zenith_deg: f64, atm_transmittance: f64) -> LightResult<()> {
    ensure(
        (0.0..=90.0).contains(&zenith_deg),
        "solar zenith angle",
        zenith_deg,
        "[0, 90] deg",
    )?;
    ensure(
        (0.0..=1.0).contains(&atm_transmittance),
        "atmospheric transmittance",
        atm_transmittance,
        "[0, 1]",
    )
}

/// Direct beam radiation on a horizontal surface as a fraction of the
/// extraterrestrial flux
///
/// τ^m · cos ψ   (Campbell & Norman Eq. 11.11 and 11.8)
///
/// # Arguments
/// * `atm_pressure` - Atmospheric pressure (kPa)
/// * `zenith_deg` - Solar zenith angle (degrees), in [0, 90]
/// * `atm_transmittance` - Atmospheric transmittance, 0.75 for clear sky
pub fn beam_fraction(
    atm_pressure: f64,
    zenith_deg: f64,
    atm_transmittance: f64,
) -> LightResult<f64> {
    check_zenith_and_transmittance(zenith_deg, atm_transmittance)?;
    let zenith_rad = *Degrees::new(zenith_deg).to_radians();
    let air_mass = optical_air_mass(atm_pressure, zenith_rad)?;
    Ok(atm_transmittance.powf(air_mass) * zenith_rad.cos())
}

/// Diffuse sky radiation on a horizontal surface as a fraction of the
/// extraterrestrial flux
///
/// 0.3 · (1 − τ^m) · cos ψ   (Campbell & Norman Eq. 11.13)
pub fn diffuse_fraction(
    atm_pressure: f64,
    zenith_deg: f64,
    atm_transmittance: f64,
) -> LightResult<f64> {
    check_zenith_and_transmittance(zenith_deg, atm_transmittance)?;
    let zenith_rad = *Degrees::new(zenith_deg).to_radians();
    let air_mass = optical_air_mass(atm_pressure, zenith_rad)?;
    let scattered = DIFFUSE_SCATTER_FRACTION * (1.0 - atm_transmittance.powf(air_mass));
    Ok(scattered * zenith_rad.cos())
}

/// Beam and diffuse fractions for one solar position
pub fn flux_fractions(
    atm_pressure: f64,
    zenith_deg: f64,
    atm_transmittance: f64,
) -> LightResult<FluxFractions> {
    Ok(FluxFractions {
        beam: beam_fraction(atm_pressure, zenith_deg, atm_transmittance)?,
        diffuse: diffuse_fraction(atm_pressure, zenith_deg, atm_transmittance)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_air_mass_reference_values() {
        let m = optical_air_mass(100.0, *Degrees::new(50.0).to_radians()).unwrap();
        assert_abs_diff_eq!(m, 1.5357589603755304, epsilon = 1e-12);

        let m = optical_air_mass(91.6, *Degrees::new(30.0).to_radians()).unwrap();
        assert_abs_diff_eq!(m, 1.0441319774485631, epsilon = 1e-12);
    }

    #[test]
    fn test_air_mass_is_one_overhead_at_sea_level() {
        assert_eq!(optical_air_mass(101.3, 0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_air_mass_pressure_envelope() {
        assert!(optical_air_mass(38.0, 0.5).is_err());
        assert!(optical_air_mass(101.4, 0.5).is_err());
        assert!(optical_air_mass(38.1, 0.5).is_ok());
        assert!(optical_air_mass(100.0, -0.1).is_err());
    }

    #[test]
    fn test_beam_fraction_overhead_equals_transmittance() {
        assert_eq!(beam_fraction(101.3, 0.0, 0.75).unwrap(), 0.75);
        let diffuse = diffuse_fraction(101.3, 0.0, 0.75).unwrap();
        assert_abs_diff_eq!(diffuse, 0.075, epsilon = 1e-15);
    }

    #[test]
    fn test_fractions_at_fifty_degrees() {
        assert_abs_diff_eq!(
            beam_fraction(101.3, 50.0, 0.45).unwrap(),
            0.18559314941768987,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            diffuse_fraction(101.3, 50.0, 0.45).unwrap(),
            0.13715833808065486,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_fractions_vanish_at_horizon() {
        let flux = flux_fractions(101.3, 90.0, 0.75).unwrap();
        assert_abs_diff_eq!(flux.beam, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(flux.diffuse, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_fraction_preconditions() {
        assert!(beam_fraction(101.3, 90.5, 0.75).is_err());
        assert!(beam_fraction(101.3, -1.0, 0.75).is_err());
        assert!(diffuse_fraction(101.3, 30.0, 1.2).is_err());
        assert!(diffuse_fraction(120.0, 30.0, 0.75).is_err());
    }

    #[test]
    fn test_total_flux_decreases_towards_horizon() {
        let high = flux_fractions(101.3, 10.0, 0.75).unwrap().total();
        let low = flux_fractions(101.3, 70.0, 0.75).unwrap().total();
        assert!(high > low, "{high} at 10° vs {low} at 70°");
    }
}
