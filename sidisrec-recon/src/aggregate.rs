//! Per-particle calorimeter and Cherenkov accumulation.

use sidisrec_core::banks::{CalorimeterBank, CherenkovBank};
use sidisrec_core::detector::{CalorimeterLayer, CherenkovDetector};
use sidisrec_core::error::Result;

/// Deposited energy per calorimeter section, in GeV.
///
/// `total` is always exactly `pcal + inner + outer`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalorimeterSums {
    /// Pre-shower calorimeter energy.
    pub pcal: f64,
    /// Inner calorimeter energy.
    pub inner: f64,
    /// Outer calorimeter energy.
    pub outer: f64,
    /// Sum over the three sections.
    pub total: f64,
}

/// Sums deposited energy for one particle, bucketed by section.
///
/// Accumulation is commutative, so the result does not depend on hit order.
///
/// # Errors
/// A hit for this particle with an unrecognized layer id is fatal
/// ([`sidisrec_core::Error::UnknownCalorimeterLayer`]): it indicates corrupted
/// or unsupported input geometry, and must abort the run rather than be
/// skipped.
pub fn sum_calorimeter(pindex: usize, bank: &CalorimeterBank) -> Result<CalorimeterSums> {
    let mut sums = CalorimeterSums::default();
    for hit in bank.iter() {
        if hit.pindex != pindex {
            continue;
        }
        match CalorimeterLayer::from_raw(hit.layer)? {
            CalorimeterLayer::Pcal => sums.pcal += hit.energy,
            CalorimeterLayer::EcalInner => sums.inner += hit.energy,
            CalorimeterLayer::EcalOuter => sums.outer += hit.energy,
        }
    }
    sums.total = sums.pcal + sums.inner + sums.outer;
    Ok(sums)
}

/// Photoelectron counts per Cherenkov counter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CherenkovSums {
    /// High-threshold counter photoelectrons.
    pub htcc: f64,
    /// Low-threshold counter photoelectrons.
    pub ltcc: f64,
}

impl CherenkovSums {
    /// True when the particle left no light in either counter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.htcc <= 0.0 && self.ltcc <= 0.0
    }
}

/// Sums photoelectron counts for one particle, bucketed by counter.
///
/// # Errors
/// A hit for this particle with an unrecognized detector id is fatal
/// ([`sidisrec_core::Error::UnknownCherenkovDetector`]).
pub fn sum_cherenkov(pindex: usize, bank: &CherenkovBank) -> Result<CherenkovSums> {
    let mut sums = CherenkovSums::default();
    for hit in bank.iter() {
        if hit.pindex != pindex {
            continue;
        }
        match CherenkovDetector::from_raw(hit.detector)? {
            CherenkovDetector::Htcc => sums.htcc += hit.nphe,
            CherenkovDetector::Ltcc => sums.ltcc += hit.nphe,
        }
    }
    Ok(sums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidisrec_core::Error;

    #[test]
    fn test_calorimeter_buckets_and_additivity() {
        let mut bank = CalorimeterBank::default();
        bank.push(0, 1, 2, 0.12, 50.0);
        bank.push(0, 1, 2, 0.03, 51.0);
        bank.push(0, 4, 2, 0.08, 52.0);
        bank.push(0, 7, 2, 0.02, 53.0);
        bank.push(1, 1, 3, 9.99, 54.0); // other particle

        let sums = sum_calorimeter(0, &bank).unwrap();
        assert!((sums.pcal - 0.15).abs() < 1e-12);
        assert!((sums.inner - 0.08).abs() < 1e-12);
        assert!((sums.outer - 0.02).abs() < 1e-12);
        assert_eq!(sums.total, sums.pcal + sums.inner + sums.outer);
    }

    #[test]
    fn test_unknown_layer_is_fatal() {
        let mut bank = CalorimeterBank::default();
        bank.push(0, 1, 2, 0.12, 50.0);
        bank.push(0, 9, 2, 0.05, 51.0);
        assert!(matches!(
            sum_calorimeter(0, &bank),
            Err(Error::UnknownCalorimeterLayer { layer: 9 })
        ));
    }

    #[test]
    fn test_cherenkov_buckets() {
        let mut bank = CherenkovBank::default();
        bank.push(0, 15, 8.0);
        bank.push(0, 15, 2.0);
        bank.push(0, 16, 1.0);
        bank.push(2, 16, 7.0);

        let sums = sum_cherenkov(0, &bank).unwrap();
        assert!((sums.htcc - 10.0).abs() < 1e-12);
        assert!((sums.ltcc - 1.0).abs() < 1e-12);
        assert!(!sums.is_empty());
        assert!(sum_cherenkov(1, &bank).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_detector_is_fatal() {
        let mut bank = CherenkovBank::default();
        bank.push(0, 14, 3.0);
        assert!(matches!(
            sum_cherenkov(0, &bank),
            Err(Error::UnknownCherenkovDetector { detector: 14 })
        ));
    }
}
