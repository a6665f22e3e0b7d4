//! Species descriptors consumed by the partitioning models
//!
//! A [`Species`] is immutable once built: every constructor validates the
//! descriptor, including deserialisation, so models can rely on positive
//! extinction coefficients and heights and a non-negative leaf area index.

use crate::error::{ensure, LightError, LightResult};
use serde::{Deserialize, Serialize};

/// Radiation-relevant description of one species in a mixed canopy
///
/// `height` is absolute plant height for the height-weighted models. Models
/// that ignore height accept any positive value; [`Species::without_height`]
/// uses 1.0, which is neutral for every height-weighted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpecies", into = "RawSpecies")]
pub struct Species {
    extinction_coefficient: f64,
    leaf_area_index: f64,
    height: f64,
    leaf_angle_ratio: Option<f64>,
}

impl Species {
    /// Create a validated species descriptor
    ///
    /// # Arguments
    /// * `extinction_coefficient` - Radiation extinction coefficient k (> 0)
    /// * `leaf_area_index` - One-sided leaf area per ground area, m²/m² (>= 0)
    /// * `height` - Plant height (> 0)
    pub fn new(
        extinction_coefficient: f64,
        leaf_area_index: f64,
        height: f64,
    ) -> LightResult<Self> {
        ensure(
            extinction_coefficient > 0.0 && extinction_coefficient.is_finite(),
            "extinction coefficient",
            extinction_coefficient,
            "(0, inf)",
        )?;
        ensure(
            leaf_area_index >= 0.0 && leaf_area_index.is_finite(),
            "leaf area index",
            leaf_area_index,
            "[0, inf)",
        )?;
        ensure(
            height > 0.0 && height.is_finite(),
            "height",
            height,
            "(0, inf)",
        )?;
        Ok(Self {
            extinction_coefficient,
            leaf_area_index,
            height,
            leaf_angle_ratio: None,
        })
    }

    /// Create a descriptor for models that do not use plant height
    pub fn without_height(extinction_coefficient: f64, leaf_area_index: f64) -> LightResult<Self> {
        Self::new(extinction_coefficient, leaf_area_index, 1.0)
    }

    /// Attach the ellipsoidal leaf angle distribution parameter (x-ratio)
    ///
    /// Required by the sub-daily model, ignored by the daily models.
    pub fn with_leaf_angle_ratio(mut self, x_ratio: f64) -> LightResult<Self> {
        ensure(
            x_ratio >= 0.0 && x_ratio.is_finite(),
            "leaf angle ratio",
            x_ratio,
            "[0, inf)",
        )?;
        self.leaf_angle_ratio = Some(x_ratio);
        Ok(self)
    }

    #[inline]
    pub fn extinction_coefficient(&self) -> f64 {
        self.extinction_coefficient
    }

    #[inline]
    pub fn leaf_area_index(&self) -> f64 {
        self.leaf_area_index
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn leaf_angle_ratio(&self) -> Option<f64> {
        self.leaf_angle_ratio
    }

    /// Product k·LAI, the light-capture strength of the species
    #[inline]
    pub fn k_lai(&self) -> f64 {
        self.extinction_coefficient * self.leaf_area_index
    }

    /// Fraction of radiation transmitted if the species grew alone
    #[inline]
    pub fn stand_alone_transmittance(&self) -> f64 {
        (-self.extinction_coefficient * self.leaf_area_index).exp()
    }

    /// Fraction of radiation intercepted if the species grew alone
    #[inline]
    pub fn stand_alone_interception(&self) -> f64 {
        1.0 - self.stand_alone_transmittance()
    }
}

/// Unvalidated wire form of [`Species`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawSpecies {
    extinction_coefficient: f64,
    leaf_area_index: f64,
    #[serde(default = "default_height")]
    height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    leaf_angle_ratio: Option<f64>,
}

fn default_height() -> f64 {
    1.0
}

impl TryFrom<RawSpecies> for Species {
    type Error = LightError;

    fn try_from(raw: RawSpecies) -> LightResult<Self> {
        let species = Species::new(raw.extinction_coefficient, raw.leaf_area_index, raw.height)?;
        match raw.leaf_angle_ratio {
            Some(x) => species.with_leaf_angle_ratio(x),
            None => Ok(species),
        }
    }
}

impl From<Species> for RawSpecies {
    fn from(s: Species) -> Self {
        RawSpecies {
            extinction_coefficient: s.extinction_coefficient,
            leaf_area_index: s.leaf_area_index,
            height: s.height,
            leaf_angle_ratio: s.leaf_angle_ratio,
        }
    }
}

/// Layout of a plain numeric species descriptor row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DescriptorLayout {
    /// `[k, LAI]`
    ExtinctionLai,
    /// `[k, LAI, height]`
    ExtinctionLaiHeight,
    /// `[k, LAI, height, x-ratio]`
    ExtinctionLaiHeightLeafAngle,
}

impl DescriptorLayout {
    /// Number of values in one row
    pub const fn row_len(self) -> usize {
        match self {
            Self::ExtinctionLai => 2,
            Self::ExtinctionLaiHeight => 3,
            Self::ExtinctionLaiHeightLeafAngle => 4,
        }
    }
}

/// Build species descriptors from numeric rows
///
/// Every row must have exactly `layout.row_len()` values; order is kept so
/// species `i` of the result corresponds to row `i`.
pub fn species_from_rows<R: AsRef<[f64]>>(
    rows: &[R],
    layout: DescriptorLayout,
) -> LightResult<Vec<Species>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let row = row.as_ref();
            if row.len() != layout.row_len() {
                return Err(LightError::DescriptorLength {
                    index,
                    expected: layout.row_len(),
                    found: row.len(),
                });
            }
            match layout {
                DescriptorLayout::ExtinctionLai => Species::without_height(row[0], row[1]),
                DescriptorLayout::ExtinctionLaiHeight => Species::new(row[0], row[1], row[2]),
                DescriptorLayout::ExtinctionLaiHeightLeafAngle => {
                    Species::new(row[0], row[1], row[2])?.with_leaf_angle_ratio(row[3])
                }
            }
        })
        .collect()
}
