//! Canopy partition trait definition
//!
//! This module defines the `CanopyPartition` trait, the common interface of
//! every radiation-partitioning model. Comparison code can hold any model as
//! a `Box<dyn CanopyPartition>` and feed it the same species list.

use crate::core_types::species::{species_from_rows, DescriptorLayout, Species};
use crate::error::LightResult;

/// Model splitting intercepted radiation among the species of a mixed canopy
///
/// Implementations are pure: the same species list always yields the same
/// result, and calls may run concurrently.
pub trait CanopyPartition: Send + Sync {
    /// Short model name used in logs and reports
    fn name(&self) -> &'static str;

    /// Numeric row layout accepted by [`CanopyPartition::partition_rows`]
    fn descriptor_layout(&self) -> DescriptorLayout;

    /// Fraction of total incoming radiation intercepted by each species
    ///
    /// # Returns
    ///
    /// One value per species, in input order
    fn partition(&self, species: &[Species]) -> LightResult<Vec<f64>>;

    /// Partition from plain numeric descriptor rows
    ///
    /// Each row must match [`CanopyPartition::descriptor_layout`] exactly.
    fn partition_rows(&self, rows: &[Vec<f64>]) -> LightResult<Vec<f64>> {
        let species = species_from_rows(rows, self.descriptor_layout())?;
        self.partition(&species)
    }
}
