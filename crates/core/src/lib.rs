//! Canopy Light Core Library
//!
//! Radiation partitioning for mixed-species canopies (intercropping). Given
//! each species' extinction coefficient, leaf area index and height, the
//! models here estimate the fraction of incoming solar radiation that every
//! species intercepts.
//!
//! ## Models
//!
//! - Cycles: k·LAI shares reweighted by relative height, any number of species
//! - Wallace: pairwise interpolation between suppressed and dominant interception
//! - APSIM: k·LAI shares, height ignored
//! - Sub-daily: beam and diffuse radiation integrated over solar zenith angles
//!
//! ## Scenarios
//!
//! LAI sweeps and measured mixture time series drive the models and compare
//! them against each other or against observations.

// Numerical and atmospheric configuration
pub mod config;

// Core types and utilities
pub mod core_types;
pub mod error;

// Physics building blocks and the partitioning models on top of them
pub mod partition;
pub mod physics;

// Sweeps and observed series
pub mod scenario;

// Re-export core types
pub use config::{DiffuseIntegration, SubDailyConfig};
pub use core_types::{Degrees, DescriptorLayout, Kilopascals, Radians, SolarState, Species};
pub use error::{LightError, LightResult};

// Re-export models
pub use partition::{
    create_partition_model, ApsimModel, CanopyPartition, CyclesModel, PartitionModel,
    SubDailyModel, WallaceModel,
};
pub use physics::FluxFractions;
pub use scenario::{run_sweep, LaiSweep, MixtureSeries, SpeciesTemplate, SweepResult};
