//! Sub-daily angular integration of canopy interception
//!
//! For each sampled solar zenith angle the incoming flux is split into beam
//! and diffuse parts. Each species attenuates both with its own ellipsoidal
//! extinction coefficients; the species are then combined in proportion to
//! their optical depths, −ln(transmittance). Summing over angles weighted by
//! flux and normalising by the total flux gives the daily interception.
//!
//! # Scientific References
//!
//! - Campbell, G.S., Norman, J.M. (1998). "An Introduction to Environmental
//!   Biophysics", 2nd ed. Springer, New York. Chapters 11 and 15
//!
//! # Boundary handling
//!
//! Angles at the horizon, or whose total flux fraction falls below
//! [`SubDailyConfig::min_flux_fraction`], contribute nothing to either the
//! numerator or the normalising flux sum. Their rows in the instantaneous
//! grids are zero.

use super::r#trait::CanopyPartition;
use crate::config::SubDailyConfig;
use crate::core_types::solar::SolarState;
use crate::core_types::species::{DescriptorLayout, Species};
use crate::error::{LightError, LightResult};
use crate::physics::extinction::{beam_extinction, diffuse_extinction_with};
use crate::physics::solar_geometry::FluxFractions;
use nalgebra::DMatrix;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Daily interception from an angle-resolved beam/diffuse canopy model
///
/// Only each species' LAI and leaf angle ratio enter the calculation. The
/// extinction coefficient and height of a [`Species`] are validated but
/// ignored, since extinction follows from the leaf angle distribution and
/// the sun position instead.
#[derive(Debug, Clone, PartialEq)]
pub struct SubDailyModel {
    config: SubDailyConfig,
}

impl SubDailyModel {
    pub const NAME: &'static str = "Sub-daily";

    /// Create a model after validating its configuration
    pub fn new(config: SubDailyConfig) -> LightResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SubDailyConfig {
        &self.config
    }
}

impl CanopyPartition for SubDailyModel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor_layout(&self) -> DescriptorLayout {
        DescriptorLayout::ExtinctionLaiHeightLeafAngle
    }

    /// Daily interception with each species at its own LAI and x-ratio
    fn partition(&self, species: &[Species]) -> LightResult<Vec<f64>> {
        if species.is_empty() {
            return Err(LightError::SpeciesCount {
                model: Self::NAME,
                expected: "at least 1",
                found: 0,
            });
        }
        let x_ratios = leaf_angle_ratios(species)?;
        let lais: Vec<f64> = species.iter().map(Species::leaf_area_index).collect();

        let samples = sample_angles(&self.config)?;
        let flux_sum = daylight_flux_sum(&samples, self.config.min_flux_fraction)?;
        let column = evaluate_column(&self.config, &samples, &lais, &x_ratios)?;

        Ok((0..species.len())
            .map(|s| column.shares.iter().map(|row| row[s]).sum::<f64>() / flux_sum)
            .collect())
    }
}

fn leaf_angle_ratios(species: &[Species]) -> LightResult<Vec<f64>> {
    species
        .iter()
        .enumerate()
        .map(|(index, s)| {
            s.leaf_angle_ratio()
                .ok_or(LightError::MissingLeafAngleRatio { index })
        })
        .collect()
}

/// Angle-by-LAI interception grids and their daily integrals
#[derive(Debug, Clone, Serialize)]
pub struct SubDailyInterception {
    /// LAI levels, one grid column each
    pub lai_levels: Vec<f64>,
    /// Daily interception per species per LAI level: `daily[species][level]`
    pub daily: Vec<Vec<f64>>,
    /// Instantaneous interception per species, angles × LAI levels
    pub instantaneous: Vec<DMatrix<f64>>,
    /// Instantaneous canopy interception, angles × LAI levels
    pub canopy: DMatrix<f64>,
    /// Beam and diffuse flux per angle (zero for skipped angles)
    pub flux: Vec<FluxFractions>,
}

/// Daily interception for species sharing each LAI level
///
/// # Arguments
/// * `config` - Atmosphere, leaf optics and zenith angle samples
/// * `lai_levels` - LAI levels evaluated for every species (> 0)
/// * `leaf_angle_ratios` - Ellipsoidal x-ratio per species
///
/// # Errors
/// Fails on an invalid configuration, empty inputs, non-positive LAI, and
/// when no sampled angle carries flux above the threshold.
pub fn sub_daily_interception(
    config: &SubDailyConfig,
    lai_levels: &[f64],
    leaf_angle_ratios: &[f64],
) -> LightResult<SubDailyInterception> {
    config.validate()?;
    if lai_levels.is_empty() {
        return Err(LightError::Empty("LAI levels"));
    }
    if leaf_angle_ratios.is_empty() {
        return Err(LightError::Empty("leaf angle ratios"));
    }
    let n_species = leaf_angle_ratios.len();

    let samples = sample_angles(config)?;
    let flux_sum = daylight_flux_sum(&samples, config.min_flux_fraction)?;

    debug!(
        "Sub-daily grid: {} angles ({} skipped) x {} LAI levels, {} species",
        samples.len(),
        samples.iter().filter(|s| s.is_none()).count(),
        lai_levels.len(),
        n_species
    );

    let columns = lai_levels
        .par_iter()
        .map(|&lai| evaluate_column(config, &samples, &vec![lai; n_species], leaf_angle_ratios))
        .collect::<LightResult<Vec<Column>>>()?;

    let n_angles = samples.len();
    let n_levels = lai_levels.len();
    let instantaneous = (0..n_species)
        .map(|s| DMatrix::from_fn(n_angles, n_levels, |a, j| columns[j].shares[a][s]))
        .collect();
    let canopy = DMatrix::from_fn(n_angles, n_levels, |a, j| columns[j].canopy[a]);
    let daily = (0..n_species)
        .map(|s| {
            columns
                .iter()
                .map(|column| column.shares.iter().map(|row| row[s]).sum::<f64>() / flux_sum)
                .collect()
        })
        .collect();
    let flux = samples
        .iter()
        .map(|sample| sample.map_or_else(FluxFractions::default, |s| s.flux))
        .collect();

    Ok(SubDailyInterception {
        lai_levels: lai_levels.to_vec(),
        daily,
        instantaneous,
        canopy,
        flux,
    })
}

/// One sampled sun position carrying usable flux
#[derive(Debug, Clone, Copy)]
struct AngleSample {
    zenith_rad: f64,
    flux: FluxFractions,
}

/// Solar samples in configuration order, `None` where the angle is skipped
fn sample_angles(config: &SubDailyConfig) -> LightResult<Vec<Option<AngleSample>>> {
    config
        .zenith_angles
        .iter()
        .map(|&zenith| {
            let state = SolarState::new(
                zenith,
                config.atmospheric_pressure,
                config.atmospheric_transmittance,
            )?;
            let flux = state.flux()?;
            let total = flux.total();
            let carries_flux = total > 0.0 && total >= config.min_flux_fraction;
            if zenith.value() >= 90.0 || !carries_flux {
                trace!("Skipping zenith {}: flux fraction {:e}", zenith, total);
                return Ok(None);
            }
            Ok(Some(AngleSample {
                zenith_rad: state.zenith_radians().value(),
                flux,
            }))
        })
        .collect()
}

fn daylight_flux_sum(samples: &[Option<AngleSample>], threshold: f64) -> LightResult<f64> {
    let flux_sum: f64 = samples.iter().flatten().map(|s| s.flux.total()).sum();
    if flux_sum > 0.0 {
        Ok(flux_sum)
    } else {
        Err(LightError::NoRadiation { threshold })
    }
}

/// Instantaneous interception at every angle for one set of species LAIs
struct Column {
    /// `shares[angle][species]`, in units of extraterrestrial flux
    shares: Vec<Vec<f64>>,
    /// Canopy interception per angle
    canopy: Vec<f64>,
}

fn evaluate_column(
    config: &SubDailyConfig,
    samples: &[Option<AngleSample>],
    lais: &[f64],
    x_ratios: &[f64],
) -> LightResult<Column> {
    let n_species = lais.len();
    let attenuation = config.leaf_transmittance.sqrt();

    // Diffuse coefficients do not depend on the sun position
    let diffuse_k = lais
        .iter()
        .zip(x_ratios)
        .map(|(&lai, &x)| diffuse_extinction_with(x, lai, config.diffuse))
        .collect::<LightResult<Vec<f64>>>()?;

    let mut shares = Vec::with_capacity(samples.len());
    let mut canopy = Vec::with_capacity(samples.len());
    for sample in samples {
        let Some(sample) = sample else {
            shares.push(vec![0.0; n_species]);
            canopy.push(0.0);
            continue;
        };
        let total = sample.flux.total();

        let mut transmitted = Vec::with_capacity(n_species);
        for s in 0..n_species {
            let lai = lais[s];
            let beam_k = beam_extinction(sample.zenith_rad, x_ratios[s])?;
            let beam = sample.flux.beam / total * (-attenuation * lai * beam_k).exp();
            let diffuse = sample.flux.diffuse / total * (-attenuation * lai * diffuse_k[s]).exp();
            let alone = (1.0 - (beam + diffuse)) * total;
            let mut species_transmittance = 1.0 - alone / total;
            if species_transmittance <= 0.0 {
                warn!(
                    "Species {} is opaque at zenith {:.4} rad, clamping transmittance",
                    s, sample.zenith_rad
                );
                species_transmittance = f64::MIN_POSITIVE;
            }
            transmitted.push(species_transmittance);
        }

        let canopy_here = (1.0 - transmitted.iter().product::<f64>()) * total;
        let optical_depths: Vec<f64> = transmitted.iter().map(|t| -t.ln()).collect();
        let depth_sum: f64 = optical_depths.iter().sum();
        let row = if depth_sum > 0.0 {
            optical_depths
                .iter()
                .map(|depth| depth / depth_sum * canopy_here)
                .collect()
        } else {
            vec![0.0; n_species]
        };
        trace!(
            "zenith {:.4} rad: canopy {:.6}, shares {:?}",
            sample.zenith_rad,
            canopy_here,
            row
        );
        shares.push(row);
        canopy.push(canopy_here);
    }
    Ok(Column { shares, canopy })
}
