//! Semantic unit types for solar geometry inputs
//!
//! Newtype wrappers that keep zenith angles in degrees apart from angles in
//! radians, and keep atmospheric pressure in kilopascals explicit.
//!
//! # Usage
//! ```
//! use canopy_light_core::core_types::units::{Degrees, Radians};
//!
//! let zenith = Degrees::new(90.0);
//! let rad: Radians = zenith.into();
//! assert!((*rad - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Degree to radian factor, applied as a single multiplication
const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

// ============================================================================
// ANGLES
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

impl Degrees {
    /// Zenith (sun directly overhead)
    pub const ZENITH: Degrees = Degrees(0.0);

    /// Horizon (sun at a right angle to the vertical)
    pub const HORIZON: Degrees = Degrees(90.0);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Degrees(value)
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> Radians {
        Radians(self.0 * DEG_TO_RAD)
    }
}

impl Deref for Degrees {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<f64> for Degrees {
    fn from(v: f64) -> Self {
        Degrees(v)
    }
}

impl From<Degrees> for Radians {
    fn from(d: Degrees) -> Radians {
        d.to_radians()
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Radians(f64);

impl Radians {
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Radians(value)
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to degrees
    #[inline]
    #[must_use]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0 / DEG_TO_RAD)
    }
}

impl Deref for Radians {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<f64> for Radians {
    fn from(v: f64) -> Self {
        Radians(v)
    }
}

impl fmt::Display for Radians {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Atmospheric pressure in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilopascals(f64);

impl Kilopascals {
    /// Mean sea-level pressure, the reference of the optical air mass
    pub const SEA_LEVEL: Kilopascals = Kilopascals(101.3);

    /// Lowest pressure the air mass relation is used for (roughly 7 km altitude)
    pub const MIN_SUPPORTED: Kilopascals = Kilopascals(38.0);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kilopascals(value)
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Kilopascals {
    fn default() -> Self {
        Self::SEA_LEVEL
    }
}

impl Deref for Kilopascals {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<f64> for Kilopascals {
    fn from(v: f64) -> Self {
        Kilopascals(v)
    }
}

impl fmt::Display for Kilopascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} kPa", self.0)
    }
}
