//! Particle classification under a momentum-reconstruction hypothesis.
//!
//! The same physical track carries two independent momentum fits: the
//! central-tracking fit stored in the particle bank and the forward-tracker
//! refit. Both run through one classification path parameterized by
//! [`Hypothesis`]; identity and validity may legitimately differ between the
//! two for the same track.

use sidisrec_core::banks::TrackCandidate;
use sidisrec_core::calibration::CalibrationTable;
use sidisrec_core::error::Result;
use sidisrec_core::event::Event;
use sidisrec_core::particle::{ParticleId, ParticleRecord};

use crate::aggregate::{CalorimeterSums, CherenkovSums};

/// Which momentum fit a record is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hypothesis {
    /// Central-tracking fit (particle bank momentum).
    Central,
    /// Forward-tracker refit.
    Forward,
}

impl Hypothesis {
    /// Both hypotheses, in stream order.
    pub const ALL: [Self; 2] = [Self::Central, Self::Forward];

    /// Output stream index.
    #[must_use]
    pub fn stream(self) -> usize {
        match self {
            Self::Central => 0,
            Self::Forward => 1,
        }
    }
}

/// Cuts applied during classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// Tracks with `chi2 / ndf` at or above this are excluded.
    pub max_chi2_ndf: f64,
    /// Minimum HTCC photoelectrons for the electron hypothesis.
    pub min_htcc_nphe: f64,
    /// Required forward-tracker ndf (layers crossed by the refit).
    pub forward_ndf: i32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_chi2_ndf: 15.0,
            min_htcc_nphe: 2.0,
            forward_ndf: 3,
        }
    }
}

/// Per-track classification inputs shared by both hypotheses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationInputs {
    /// Raw pid hint from storage.
    pub hint: i32,
    /// Detector status word; a negative sign marks the triggering hit.
    pub status: i16,
    /// Calorimeter sums for this particle.
    pub calorimeter: CalorimeterSums,
    /// Cherenkov sums for this particle.
    pub cherenkov: CherenkovSums,
    /// Track sector, 1..=6.
    pub sector: i32,
    /// Track-fit degrees of freedom.
    pub ndf: i32,
    /// Track-fit chi2.
    pub chi2: f64,
}

/// Builds the kinematic shell of a record for one hypothesis, before
/// identity assignment.
///
/// The forward hypothesis is invalid from the start when the forward bank has
/// no row for the track's index, or when the refit did not cross the required
/// number of layers. Charge and beta always come from the particle bank (the
/// forward fit remeasures only momentum and vertex).
#[must_use]
pub fn init_record(
    event: &Event,
    track: TrackCandidate,
    hypothesis: Hypothesis,
    config: &ClassifierConfig,
) -> ParticleRecord {
    let Some(particle) = event.particles.row(track.pindex) else {
        return ParticleRecord::placeholder();
    };

    let mut record = ParticleRecord {
        charge: particle.charge,
        beta: particle.beta,
        is_valid: true,
        ..ParticleRecord::default()
    };

    match hypothesis {
        Hypothesis::Central => {
            record.px = particle.px;
            record.py = particle.py;
            record.pz = particle.pz;
            record.vx = particle.vx;
            record.vy = particle.vy;
            record.vz = particle.vz;
        }
        Hypothesis::Forward => match event.forward.row(track.index) {
            Some(fwd) if fwd.ndf == config.forward_ndf => {
                record.px = fwd.px;
                record.py = fwd.py;
                record.pz = fwd.pz;
                record.vx = fwd.vx;
                record.vy = fwd.vy;
                record.vz = fwd.vz;
            }
            _ => record.is_valid = false,
        },
    }
    record
}

/// Assigns identity, mass, validity, and the trigger-electron flag.
///
/// # Errors
/// Returns [`sidisrec_core::Error::InvalidSector`] when the track's sector is
/// outside 1..=6 (the calibration table cannot be consulted).
pub fn classify(
    record: &mut ParticleRecord,
    inputs: &ClassificationInputs,
    calibration: &CalibrationTable,
    config: &ClassifierConfig,
) -> Result<()> {
    // A record invalid from construction (no forward track) stays invalid.
    if !record.is_valid {
        return Ok(());
    }
    if inputs.ndf == 0 {
        record.is_valid = false;
        return Ok(());
    }
    if inputs.chi2 / f64::from(inputs.ndf) >= config.max_chi2_ndf {
        record.is_valid = false;
        return Ok(());
    }

    let p = record.momentum();
    let has_calorimeter = inputs.calorimeter.total > 0.0;
    let has_cherenkov = !inputs.cherenkov.is_empty();

    let is_electron = if has_calorimeter && p > 0.0 && inputs.cherenkov.htcc >= config.min_htcc_nphe
    {
        calibration.accepts(inputs.sector, p, inputs.calorimeter.total / p)?
    } else {
        false
    };

    if is_electron {
        record.pid = if record.charge < 0 {
            ParticleId::Electron
        } else {
            ParticleId::Positron
        };
    } else if inputs.hint.abs() == 11 && (!has_calorimeter || !has_cherenkov) {
        // The hint demands an electron hypothesis we cannot evaluate.
        record.is_valid = false;
        return Ok(());
    } else {
        record.pid = ParticleId::from_hint(record.charge, inputs.hint);
    }

    record.mass = record.pid.mass();
    record.is_trigger_electron = record.pid == ParticleId::Electron && inputs.status < 0;
    Ok(())
}
