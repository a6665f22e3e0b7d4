//! Error type shared by every radiation-partitioning operation
//!
//! All failures are precondition violations on physically meaningless input.
//! Nothing here is retried or recovered: the caller gets the first violation
//! found and no partial result.

use thiserror::Error;

/// Error type for invalid canopy or atmosphere inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightError {
    #[error("{quantity} = {value} is outside the valid range {valid}")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        valid: &'static str,
    },
    #[error("{model} model requires {expected} species, got {found}")]
    SpeciesCount {
        model: &'static str,
        expected: &'static str,
        found: usize,
    },
    #[error("species descriptor {index} has {found} values, expected {expected}")]
    DescriptorLength {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("species {index} intercepts no light (extinction coefficient x LAI = 0)")]
    ZeroLightCapture { index: usize },
    #[error("species {index}: {factor} weighting factor underflows to zero")]
    WeightUnderflow { index: usize, factor: &'static str },
    #[error("species {index} has no leaf angle distribution ratio")]
    MissingLeafAngleRatio { index: usize },
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("no zenith angle carries a flux fraction above {threshold}")]
    NoRadiation { threshold: f64 },
    #[error("diffuse transmittance integral is not positive ({0})")]
    DegenerateIntegral(f64),
    #[error("{what} has length {found}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("unknown partition model '{0}' (expected cycles, wallace, apsim or sub-daily)")]
    UnknownModel(String),
}

/// Convenience type for `Result<T, LightError>`.
pub type LightResult<T> = Result<T, LightError>;

/// Fail with [`LightError::OutOfRange`] unless `valid_if` holds.
///
/// Conditions are written so that NaN never satisfies them.
#[inline]
pub(crate) fn ensure(
    valid_if: bool,
    quantity: &'static str,
    value: f64,
    valid: &'static str,
) -> LightResult<()> {
    if valid_if {
        Ok(())
    } else {
        Err(LightError::OutOfRange {
            quantity,
            value,
            valid,
        })
    }
}
