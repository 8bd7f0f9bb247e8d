//! Per-run sampling-fraction calibration.
//!
//! The electron acceptance band is a momentum-dependent Gaussian: mean and
//! sigma are each parameterized as `c0 * (c1 + c2/p + (c3/p)^2)` per sector,
//! with the band half-width `nsigma * sigma(p)`. The table is loaded once per
//! run and shared read-only across all events and both hypotheses.

use serde::{Deserialize, Serialize};

use crate::detector::{check_sector, SECTOR_COUNT};
use crate::error::Result;

/// Number of coefficients in each sampling-fraction parameterization.
pub const SF_PARAM_COUNT: usize = 4;

/// Default acceptance band half-width in sigmas.
pub const DEFAULT_NSIGMA: f64 = 2.0;

/// Sampling-fraction fit parameters for one sector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingFraction {
    /// Coefficients of the band mean.
    pub mean: [f64; SF_PARAM_COUNT],
    /// Coefficients of the band width.
    pub sigma: [f64; SF_PARAM_COUNT],
}

fn eval(c: &[f64; SF_PARAM_COUNT], p: f64) -> f64 {
    c[0] * (c[1] + c[2] / p + (c[3] / p).powi(2))
}

impl SamplingFraction {
    /// Band mean at momentum `p` (GeV).
    #[must_use]
    pub fn mean_at(&self, p: f64) -> f64 {
        eval(&self.mean, p)
    }

    /// Band sigma at momentum `p` (GeV).
    #[must_use]
    pub fn sigma_at(&self, p: f64) -> f64 {
        eval(&self.sigma, p)
    }
}

/// Read-only per-run calibration table: one parameter set per sector.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    sectors: [SamplingFraction; SECTOR_COUNT],
    nsigma: f64,
}

impl CalibrationTable {
    /// Builds a table from per-sector parameters with the default band width.
    #[must_use]
    pub fn new(sectors: [SamplingFraction; SECTOR_COUNT]) -> Self {
        Self {
            sectors,
            nsigma: DEFAULT_NSIGMA,
        }
    }

    /// Overrides the acceptance band half-width.
    #[must_use]
    pub fn with_nsigma(mut self, nsigma: f64) -> Self {
        self.nsigma = nsigma;
        self
    }

    /// Parameters for a 1-based sector.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSector`] when outside 1..=6.
    pub fn sector(&self, sector: i32) -> Result<&SamplingFraction> {
        let idx = check_sector(sector)? - 1;
        Ok(&self.sectors[idx])
    }

    /// Whether a measured sampling fraction at momentum `p` falls inside the
    /// sector's acceptance band.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSector`] for a sector outside 1..=6.
    pub fn accepts(&self, sector: i32, p: f64, sampling_fraction: f64) -> Result<bool> {
        let params = self.sector(sector)?;
        if p <= 0.0 {
            return Ok(false);
        }
        let mean = params.mean_at(p);
        let half_width = self.nsigma * params.sigma_at(p);
        Ok((sampling_fraction - mean).abs() < half_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_table() -> CalibrationTable {
        // mean 0.25 and sigma 0.02 at every momentum
        let sf = SamplingFraction {
            mean: [0.25, 1.0, 0.0, 0.0],
            sigma: [0.02, 1.0, 0.0, 0.0],
        };
        CalibrationTable::new([sf; SECTOR_COUNT])
    }

    #[test]
    fn test_parameterization_shape() {
        let sf = SamplingFraction {
            mean: [0.25, 1.0, -0.03, 0.1],
            sigma: [0.02, 1.0, 0.0, 0.0],
        };
        // c0 * (c1 + c2/p + (c3/p)^2) at p = 2
        assert_relative_eq!(
            sf.mean_at(2.0),
            0.25 * (1.0 - 0.03 / 2.0 + (0.1_f64 / 2.0).powi(2)),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_acceptance_band() {
        let table = flat_table();
        // band is 0.25 +- 0.04
        assert!(table.accepts(1, 5.0, 0.25).unwrap());
        assert!(table.accepts(1, 5.0, 0.22).unwrap());
        assert!(!table.accepts(1, 5.0, 0.29).unwrap());
        assert!(!table.accepts(1, 5.0, 0.21).unwrap());
    }

    #[test]
    fn test_zero_momentum_rejected() {
        let table = flat_table();
        assert!(!table.accepts(1, 0.0, 0.25).unwrap());
    }

    #[test]
    fn test_bad_sector_is_error() {
        use crate::error::Error;

        let table = flat_table();
        assert!(table.accepts(0, 5.0, 0.25).is_err());
        assert!(table.accepts(7, 5.0, 0.25).is_err());
        // lookup shares the sector bounds check, so the variant matches
        assert!(matches!(table.sector(0), Err(Error::InvalidSector(0))));
        assert!(matches!(table.sector(7), Err(Error::InvalidSector(7))));
        assert!(table.sector(1).is_ok());
        assert!(table.sector(6).is_ok());
    }

    #[test]
    fn test_nsigma_override() {
        let table = flat_table().with_nsigma(3.0);
        assert!(table.accepts(1, 5.0, 0.30).unwrap()); // inside 0.25 +- 0.06
    }
}
