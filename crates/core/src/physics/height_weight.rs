//! Height dominance weighting between suppressed and dominant extremes
//!
//! Reference: Camargo, G.G.T. (2014). Ph.D. Dissertation, Penn State University

use crate::error::{ensure, LightResult};

/// Interception weight of a species from its relative canopy height
///
/// Linear interpolation between the suppressed weight (height dominance 0)
/// and 1 (height dominance 1, species at canopy mean height). Above the mean
/// the weight moves towards the dominant weight, one `n_species - 1`th of the
/// way per unit of dominance.
///
/// # Arguments
/// * `height_dominance` - Species height relative to canopy mean (`N·h_i / Σh`)
/// * `dominant_factor` - Weight if the species intercepted first
/// * `suppressed_factor` - Weight if every other species intercepted first
/// * `n_species` - Number of species in the canopy
///
/// # Examples
/// ```
/// use canopy_light_core::physics::height_weight;
///
/// let w = height_weight(0.75, 1.52, 0.56, 3).unwrap();
/// assert!((w - 0.89).abs() < 1e-12);
/// ```
pub fn height_weight(
    height_dominance: f64,
    dominant_factor: f64,
    suppressed_factor: f64,
    n_species: usize,
) -> LightResult<f64> {
    ensure(
        height_dominance > 0.0,
        "height dominance",
        height_dominance,
        "(0, inf)",
    )?;
    ensure(
        dominant_factor > 0.0,
        "dominant factor",
        dominant_factor,
        "(0, inf)",
    )?;
    ensure(
        suppressed_factor > 0.0,
        "suppressed factor",
        suppressed_factor,
        "(0, inf)",
    )?;
    ensure(n_species > 0, "species count", n_species as f64, "[1, inf)")?;

    if height_dominance == 1.0 {
        return Ok(1.0);
    }
    if height_dominance < 1.0 {
        let weight = (height_dominance - 1.0) * (suppressed_factor - 1.0) / (0.0 - 1.0) + 1.0;
        return Ok(weight);
    }
    // Taller than the mean is only reachable with another species present
    ensure(
        n_species >= 2,
        "species count",
        n_species as f64,
        "[2, inf) for a species above canopy mean height",
    )?;
    let per_competitor = (height_dominance - 1.0) / (n_species - 1) as f64;
    Ok(1.0 + per_competitor * (dominant_factor - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_values() {
        let shorter = height_weight(0.75, 1.52, 0.56, 3).unwrap();
        let taller = height_weight(1.5, 1.52, 0.56, 3).unwrap();
        assert_abs_diff_eq!(shorter, 0.89, epsilon = 1e-12);
        assert_abs_diff_eq!(taller, 1.13, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_height_is_neutral() {
        for (dom, sup, n) in [(1.52, 0.56, 3), (3.0, 0.1, 2), (1.01, 0.99, 7)] {
            assert_eq!(height_weight(1.0, dom, sup, n).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_extremes() {
        // Zero height dominance is excluded, so approach it
        let w = height_weight(1e-12, 1.5, 0.4, 2).unwrap();
        assert_abs_diff_eq!(w, 0.4, epsilon = 1e-9);
        // Two species: dominance 2 means the other species has zero height
        let w = height_weight(2.0, 1.5, 0.4, 2).unwrap();
        assert_abs_diff_eq!(w, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_non_positive_inputs_fail() {
        assert!(height_weight(0.0, 1.5, 0.5, 2).is_err());
        assert!(height_weight(0.8, -1.5, 0.5, 2).is_err());
        assert!(height_weight(0.8, 1.5, 0.0, 2).is_err());
        assert!(height_weight(0.8, 1.5, 0.5, 0).is_err());
        assert!(height_weight(1.2, 1.5, 0.5, 1).is_err());
    }
}
