//! Core types and utilities

pub mod solar;
pub mod species;
pub mod units;

pub use solar::SolarState;
pub use species::{species_from_rows, DescriptorLayout, Species};
pub use units::*;
