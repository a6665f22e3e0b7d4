//! Radiation partitioning among the species of a mixed canopy
//!
//! Every model implements [`CanopyPartition`] and answers the same question:
//! what fraction of the incoming radiation does each species intercept?
//!
//! # Models
//!
//! - [`CyclesModel`]: k·LAI shares reweighted by relative height, any number of species
//! - [`WallaceModel`]: pairwise interpolation by height fraction, exactly two species
//! - [`ApsimModel`]: k·LAI shares, height ignored
//! - [`SubDailyModel`]: beam/diffuse angular integration over a day
//!
//! # Example
//!
//! ```rust
//! use canopy_light_core::partition::{create_partition_model, PartitionModel};
//!
//! let model = create_partition_model(&"cycles".parse::<PartitionModel>().unwrap()).unwrap();
//! let shares = model
//!     .partition_rows(&[vec![0.5, 1.0, 1.0], vec![0.7, 3.0, 1.0]])
//!     .unwrap();
//! assert_eq!(shares.len(), 2);
//! ```

mod apsim;
mod canopy;
mod cycles;
mod sub_daily;
#[allow(clippy::module_name_repetitions)]
mod r#trait;
mod wallace;

// Re-exports
pub use apsim::{apsim_interception, ApsimModel};
pub use canopy::canopy_interception;
pub use cycles::{cycles_interception, CyclesModel};
pub use r#trait::CanopyPartition;
pub use sub_daily::{sub_daily_interception, SubDailyInterception, SubDailyModel};
pub use wallace::{wallace_interception, WallaceModel};

use crate::config::SubDailyConfig;
use crate::error::{LightError, LightResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Serialisable selector for a partitioning model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum PartitionModel {
    Cycles,
    Wallace,
    Apsim,
    /// Sub-daily integration under the given atmosphere and sampling
    SubDaily(SubDailyConfig),
}

impl PartitionModel {
    /// Command-line style name, accepted back by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cycles => "cycles",
            Self::Wallace => "wallace",
            Self::Apsim => "apsim",
            Self::SubDaily(_) => "sub-daily",
        }
    }
}

impl fmt::Display for PartitionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PartitionModel {
    type Err = LightError;

    /// Parse a model name; `sub-daily` uses the clear-sky configuration
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cycles" => Ok(Self::Cycles),
            "wallace" => Ok(Self::Wallace),
            "apsim" => Ok(Self::Apsim),
            "sub-daily" | "subdaily" => Ok(Self::SubDaily(SubDailyConfig::clear_sky())),
            _ => Err(LightError::UnknownModel(s.to_string())),
        }
    }
}

/// Create a partitioning model from its selector
///
/// # Arguments
///
/// * `model` - Which model to build, with its configuration if any
///
/// # Returns
///
/// A boxed `CanopyPartition` trait object
///
/// # Errors
///
/// Fails if a sub-daily configuration does not validate.
pub fn create_partition_model(model: &PartitionModel) -> LightResult<Box<dyn CanopyPartition>> {
    let boxed: Box<dyn CanopyPartition> = match model {
        PartitionModel::Cycles => Box::new(CyclesModel),
        PartitionModel::Wallace => Box::new(WallaceModel),
        PartitionModel::Apsim => Box::new(ApsimModel),
        PartitionModel::SubDaily(config) => Box::new(SubDailyModel::new(config.clone())?),
    };
    debug!("Using {} partition model", boxed.name());
    Ok(boxed)
}
