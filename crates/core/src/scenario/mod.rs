//! Scenario drivers built on the partitioning models
//!
//! - [`sweep`]: evaluate a model along a line of increasing total LAI
//! - [`observed`]: replay a measured mixture time series and score the fit

pub mod observed;
pub mod sweep;

pub use observed::{mean_absolute_bias, MixtureSeries, SeriesBias, SpeciesSeries};
pub use sweep::{run_sweep, LaiSweep, SpeciesTemplate, SweepResult};

/// `points` evenly spaced values from `start` to `end`, both included
///
/// The last value is exactly `end`. A single point yields `[start]`.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            let mut values: Vec<f64> = (0..points).map(|i| i as f64 * step + start).collect();
            if let Some(last) = values.last_mut() {
                *last = end;
            }
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(0.005, 3.5, 10);
        assert_eq!(values.len(), 10);
        assert_eq!(values[0], 0.005);
        assert_eq!(values[9], 3.5);
        assert_abs_diff_eq!(values[1], 0.393333333333333, epsilon = 1e-12);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(0.0, 90.0, 19)[1], 5.0);
    }
}
