//! sidisrec-core: Bank containers and types for SIDIS event reconstruction.
//!
//! This crate provides the typed entities the reconstruction pipeline
//! operates on: struct-of-sequences bank containers with row views,
//! closed detector/particle enumerations, the per-run sampling-fraction
//! calibration table, and the output row record.
//!

pub mod banks;
pub mod calibration;
pub mod detector;
pub mod error;
pub mod event;
pub mod particle;
pub mod record;

pub use banks::{
    CalorimeterBank, CalorimeterHit, CherenkovBank, CherenkovHit, ForwardBank, ForwardTrack,
    ParticleBank, ParticleRow, ScintillatorBank, ScintillatorHit, TrackBank, TrackCandidate,
};
pub use calibration::{CalibrationTable, SamplingFraction, DEFAULT_NSIGMA, SF_PARAM_COUNT};
pub use detector::{
    check_sector, CalorimeterLayer, CherenkovDetector, FtofLayer, FTOF_DETECTOR_ID, SECTOR_COUNT,
};
pub use error::{Error, Result};
pub use event::Event;
pub use particle::{ParticleId, ParticleRecord};
pub use record::{SidisRow, CSV_HEADER, FIELD_COUNT};
