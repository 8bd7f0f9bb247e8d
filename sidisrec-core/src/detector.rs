//! Closed detector enumerations and geometry constants.
//!
//! Raw bank data identifies detectors and layers by small integers. Everything
//! downstream works with the enumerations below so that an unrecognized id is
//! caught once, at decode time, instead of leaking through accumulation loops.

use crate::error::{Error, Result};

/// Detector id of the forward time-of-flight scintillator walls.
pub const FTOF_DETECTOR_ID: i32 = 12;

/// Number of azimuthal sectors in the forward detector.
pub const SECTOR_COUNT: usize = 6;

/// Forward TOF scintillator layers, ordered by timing precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FtofLayer {
    /// Panel 1B, the best-resolved layer.
    OneB,
    /// Panel 1A.
    OneA,
    /// Panel 2.
    Two,
}

impl FtofLayer {
    /// Decodes a raw layer id. Returns `None` for layers that are not part of
    /// the forward TOF (other scintillators exist but carry no usable time).
    #[must_use]
    pub fn from_raw(layer: i32) -> Option<Self> {
        match layer {
            1 => Some(Self::OneA),
            2 => Some(Self::OneB),
            3 => Some(Self::Two),
            _ => None,
        }
    }
}

/// Electromagnetic calorimeter sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalorimeterLayer {
    /// Pre-shower calorimeter.
    Pcal,
    /// Inner electromagnetic calorimeter.
    EcalInner,
    /// Outer electromagnetic calorimeter.
    EcalOuter,
}

impl CalorimeterLayer {
    /// Decodes a raw layer id.
    ///
    /// # Errors
    /// Returns [`Error::UnknownCalorimeterLayer`] for any id outside the three
    /// supported sections. This is a fatal condition: it means the input was
    /// produced by an unsupported geometry.
    pub fn from_raw(layer: i32) -> Result<Self> {
        match layer {
            1 => Ok(Self::Pcal),
            4 => Ok(Self::EcalInner),
            7 => Ok(Self::EcalOuter),
            _ => Err(Error::UnknownCalorimeterLayer { layer }),
        }
    }
}

/// Cherenkov counters used for lepton/hadron discrimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CherenkovDetector {
    /// High-threshold Cherenkov counter.
    Htcc,
    /// Low-threshold Cherenkov counter.
    Ltcc,
}

impl CherenkovDetector {
    /// Decodes a raw detector id.
    ///
    /// # Errors
    /// Returns [`Error::UnknownCherenkovDetector`] for any other id; fatal for
    /// the same reason as the calorimeter counterpart.
    pub fn from_raw(detector: i32) -> Result<Self> {
        match detector {
            15 => Ok(Self::Htcc),
            16 => Ok(Self::Ltcc),
            _ => Err(Error::UnknownCherenkovDetector { detector }),
        }
    }
}

/// Validates a 1-based sector number.
///
/// # Errors
/// Returns [`Error::InvalidSector`] when outside 1..=6.
pub fn check_sector(sector: i32) -> Result<usize> {
    if (1..=SECTOR_COUNT as i32).contains(&sector) {
        Ok(sector as usize)
    } else {
        Err(Error::InvalidSector(sector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ftof_layer_decoding() {
        assert_eq!(FtofLayer::from_raw(1), Some(FtofLayer::OneA));
        assert_eq!(FtofLayer::from_raw(2), Some(FtofLayer::OneB));
        assert_eq!(FtofLayer::from_raw(3), Some(FtofLayer::Two));
        assert_eq!(FtofLayer::from_raw(4), None);
    }

    #[test]
    fn test_calorimeter_layer_decoding() {
        assert_eq!(CalorimeterLayer::from_raw(1).unwrap(), CalorimeterLayer::Pcal);
        assert_eq!(CalorimeterLayer::from_raw(4).unwrap(), CalorimeterLayer::EcalInner);
        assert_eq!(CalorimeterLayer::from_raw(7).unwrap(), CalorimeterLayer::EcalOuter);
        assert!(matches!(
            CalorimeterLayer::from_raw(2),
            Err(Error::UnknownCalorimeterLayer { layer: 2 })
        ));
    }

    #[test]
    fn test_cherenkov_decoding() {
        assert_eq!(CherenkovDetector::from_raw(15).unwrap(), CherenkovDetector::Htcc);
        assert_eq!(CherenkovDetector::from_raw(16).unwrap(), CherenkovDetector::Ltcc);
        assert!(CherenkovDetector::from_raw(12).is_err());
    }

    #[test]
    fn test_sector_bounds() {
        assert_eq!(check_sector(1).unwrap(), 1);
        assert_eq!(check_sector(6).unwrap(), 6);
        assert!(check_sector(0).is_err());
        assert!(check_sector(7).is_err());
    }
}
