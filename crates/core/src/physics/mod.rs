//! Physics building blocks for canopy radiation interception

pub mod extinction;
pub mod height_weight;
pub mod solar_geometry;

pub use extinction::{beam_extinction, diffuse_extinction, diffuse_extinction_with};
pub use height_weight::height_weight;
pub use solar_geometry::{
    beam_fraction, diffuse_fraction, flux_fractions, optical_air_mass, FluxFractions,
};
