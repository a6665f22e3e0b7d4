//! Literal reference values for the solar geometry, extinction and
//! partitioning functions
//!
//! Values were produced independently in double precision from the published
//! formulas. Tolerances are 1e-9 or tighter.
//!
//! Run tests with: cargo test --test `reference_values`

mod common;

use approx::assert_abs_diff_eq;
use canopy_light_core::{
    partition::{
        apsim_interception, canopy_interception, cycles_interception, sub_daily_interception,
        wallace_interception,
    },
    physics::{
        beam_extinction, beam_fraction, diffuse_extinction, diffuse_fraction, height_weight,
        optical_air_mass,
    },
    scenario::linspace,
    Degrees, LightError, Species, SubDailyConfig,
};

fn rows(rows: &[[f64; 3]]) -> Vec<Species> {
    rows.iter()
        .map(|r| Species::new(r[0], r[1], r[2]).unwrap())
        .collect()
}

fn assert_series(actual: &[f64], expected: &[f64], epsilon: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*a, *e, epsilon = epsilon);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Solar geometry
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_optical_air_mass() {
    let fifty = Degrees::new(50.0).to_radians().value();
    let thirty = Degrees::new(30.0).to_radians().value();
    assert_abs_diff_eq!(
        optical_air_mass(100.0, fifty).unwrap(),
        1.5357589603755304,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        optical_air_mass(91.6, thirty).unwrap(),
        1.0441319774485631,
        epsilon = 1e-12
    );
}

#[test]
fn test_beam_and_diffuse_fractions() {
    assert_abs_diff_eq!(
        beam_fraction(101.3, 0.0, 0.75).unwrap(),
        0.75,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        diffuse_fraction(101.3, 0.0, 0.75).unwrap(),
        0.075,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        beam_fraction(101.3, 50.0, 0.45).unwrap(),
        0.18559314941768987,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        diffuse_fraction(101.3, 50.0, 0.45).unwrap(),
        0.13715833808065486,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        beam_fraction(100.0, 30.0, 0.75).unwrap(),
        0.6239003163011756,
        epsilon = 1e-9
    );
}

#[test]
fn test_pressure_outside_envelope_fails() {
    assert!(matches!(
        optical_air_mass(120.0, 0.5),
        Err(LightError::OutOfRange { .. })
    ));
    assert!(optical_air_mass(38.0, 0.5).is_err());
}

// ═══════════════════════════════════════════════════════════════════════════════
// Extinction coefficients
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_beam_extinction() {
    assert_abs_diff_eq!(
        beam_extinction(0.087, 0.0).unwrap(),
        0.055576591963547875,
        epsilon = 1e-10
    );
    assert_abs_diff_eq!(
        beam_extinction(0.087, 2.0).unwrap(),
        0.7254823957447912,
        epsilon = 1e-10
    );
    assert_abs_diff_eq!(
        beam_extinction(0.0, 1.0).unwrap(),
        0.499670104944067,
        epsilon = 1e-10
    );
}

#[test]
fn test_diffuse_extinction() {
    assert_abs_diff_eq!(
        diffuse_extinction(2.0, 0.1).unwrap(),
        0.9710451784887272,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        diffuse_extinction(0.0, 0.1).unwrap(),
        0.9099461266386055,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        diffuse_extinction(1.0, 1.0).unwrap(),
        0.8131934315301873,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        diffuse_extinction(0.5, 2.0).unwrap(),
        0.6602218135240581,
        epsilon = 1e-9
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Height weighting
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_height_weight_branches() {
    assert_eq!(height_weight(1.0, 1.2, 0.8, 2).unwrap(), 1.0);
    assert_abs_diff_eq!(
        height_weight(0.5, 1.2, 0.78, 2).unwrap(),
        0.89,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        height_weight(1.5, 1.26, 0.8, 3).unwrap(),
        1.065,
        epsilon = 1e-12
    );
    assert!(height_weight(1.5, 1.2, 0.8, 1).is_err());
}

// ═══════════════════════════════════════════════════════════════════════════════
// Daily partitioning
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_cycles_three_species() {
    let canopy = rows(&[[0.5, 1.0, 1.0], [0.5, 1.0, 2.0], [0.5, 1.0, 1.0]]);
    let equal_k = cycles_interception(&canopy).unwrap();
    let expected = [
        0.2375841063971732,
        0.30170162705722364,
        0.2375841063971732,
    ];
    assert_series(&equal_k, &expected, 1e-9);

    let canopy = rows(&[[0.5, 1.0, 0.5], [0.6, 1.2, 1.0], [0.7, 1.4, 1.5]]);
    let mixed = cycles_interception(&canopy).unwrap();
    let expected = [
        0.1382221443123924,
        0.29363745830727567,
        0.45733723901799805,
    ];
    assert_series(&mixed, &expected, 1e-9);
}

#[test]
fn test_apsim_pair() {
    let pair = rows(&[[0.5, 1.0, 1.0], [0.7, 3.0, 1.0]]);
    let apsim = apsim_interception(&pair);
    assert_series(&apsim, &[0.17802431188185888, 0.7477021099038071], 1e-12);
    assert_abs_diff_eq!(
        apsim.iter().sum::<f64>(),
        0.925726421785666,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        canopy_interception(&pair),
        0.925726421785666,
        epsilon = 1e-12
    );
}

#[test]
fn test_wallace_pair() {
    let pair = rows(&[[0.5, 1.0, 1.0], [0.7, 3.0, 1.0]]);
    let (first, second) = wallace_interception(&pair[0], &pair[1]);
    assert_abs_diff_eq!(first, 0.22082609516300733, epsilon = 1e-12);
    assert_abs_diff_eq!(second, 0.7049003266226588, epsilon = 1e-12);

    let twin = Species::new(0.5, 1.0, 1.0).unwrap();
    let (a, b) = wallace_interception(&twin, &twin);
    assert_abs_diff_eq!(a, 0.31606027941427883, epsilon = 1e-12);
    assert_abs_diff_eq!(b, 0.31606027941427883, epsilon = 1e-12);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sub-daily integration
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_sub_daily_clear_sky_lai_grid() {
    let config = SubDailyConfig::clear_sky();
    let lai_levels = linspace(0.005, 3.5, 10);
    let result = sub_daily_interception(&config, &lai_levels, &[0.5, 2.0]).unwrap();

    let expected_sp1 = [
        0.002664102407232757,
        0.15446752645242087,
        0.24034437577342369,
        0.291464409658435,
        0.32261794238738495,
        0.3418107021772043,
        0.35364718543703516,
        0.3608773209363869,
        0.36518652571703897,
        0.36762743105773205,
    ];
    let expected_sp2 = [
        0.00366763666921173,
        0.22547809993185436,
        0.36289459721847195,
        0.45082032043978876,
        0.5082152967306073,
        0.5462654931023717,
        0.5718405974775643,
        0.5892665543628096,
        0.6013152306395074,
        0.6097857299674417,
    ];
    assert_series(&result.daily[0], &expected_sp1, 1e-9);
    assert_series(&result.daily[1], &expected_sp2, 1e-9);

    // The erectophile species (x = 0.5) intercepts less than the planophile one
    for (sp1, sp2) in result.daily[0].iter().zip(&result.daily[1]) {
        assert!(sp1 < sp2);
    }
}

#[test]
fn test_sub_daily_single_species() {
    let config = SubDailyConfig::clear_sky();
    let result = sub_daily_interception(&config, &[1.0], &[1.0]).unwrap();
    assert_abs_diff_eq!(result.daily[0][0], 0.4413778770579089, epsilon = 1e-9);
}
