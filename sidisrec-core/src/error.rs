//! Error types for sidisrec-core.

use thiserror::Error;

/// Result type alias for sidisrec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for sidisrec operations.
///
/// The two geometry variants are fatal for the whole run: they signal
/// corrupted or unsupported input, not a bad event.
#[derive(Error, Debug)]
pub enum Error {
    /// Calorimeter hit with a layer id outside PCAL/ECIN/ECOU.
    #[error("unknown calorimeter layer id: {layer}")]
    UnknownCalorimeterLayer { layer: i32 },

    /// Cherenkov hit with a detector id outside HTCC/LTCC.
    #[error("unknown cherenkov detector id: {detector}")]
    UnknownCherenkovDetector { detector: i32 },

    /// Sector outside 1..=6.
    #[error("invalid sector: {0}")]
    InvalidSector(i32),

    /// Malformed or missing calibration data.
    #[error("calibration error: {0}")]
    Calibration(String),

    /// Bank columns of one event disagree in length.
    #[error("inconsistent bank: {0}")]
    InconsistentBank(String),
}
