//! Trigger-electron search across track positions.
//!
//! The two momentum hypotheses share one scan: tracks are visited in bank
//! order and the scan stops at the first position where either hypothesis
//! yields a valid trigger electron. Both hypotheses' records from that
//! position are kept, so each output stream measures hadrons against the
//! reference built from its own momentum fit. The scan position is shared
//! even when only one hypothesis qualified there.

use sidisrec_core::banks::TrackCandidate;
use sidisrec_core::calibration::CalibrationTable;
use sidisrec_core::error::Result;
use sidisrec_core::event::Event;
use sidisrec_core::particle::ParticleRecord;

use crate::aggregate::{sum_calorimeter, sum_cherenkov};
use crate::classify::{classify, init_record, ClassificationInputs, ClassifierConfig, Hypothesis};

/// Outcome of the trigger-electron scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSearch {
    /// Track-bank position where the scan stopped, if any hypothesis found a
    /// trigger electron.
    pub position: Option<usize>,
    /// Trigger reference per hypothesis, indexed by [`Hypothesis::stream`].
    /// Placeholders when the scan exhausted the bank.
    pub records: [ParticleRecord; 2],
}

impl TriggerSearch {
    /// The reference record for one hypothesis.
    #[must_use]
    pub fn record(&self, hypothesis: Hypothesis) -> &ParticleRecord {
        &self.records[hypothesis.stream()]
    }

    /// True when no hypothesis found a trigger electron.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
    }
}

/// Gathers the shared per-track classification inputs.
pub(crate) fn track_inputs(event: &Event, track: TrackCandidate) -> Result<ClassificationInputs> {
    let (hint, status) = event
        .particles
        .row(track.pindex)
        .map_or((0, 0), |p| (p.pid, p.status));
    Ok(ClassificationInputs {
        hint,
        status,
        calorimeter: sum_calorimeter(track.pindex, &event.calorimeter)?,
        cherenkov: sum_cherenkov(track.pindex, &event.cherenkov)?,
        sector: track.sector,
        ndf: track.ndf,
        chi2: track.chi2,
    })
}

/// Scans the track bank for the trigger electron.
///
/// # Errors
/// Propagates fatal detector-geometry errors from hit aggregation and sector
/// lookup.
pub fn find_trigger_electron(
    event: &Event,
    calibration: &CalibrationTable,
    config: &ClassifierConfig,
) -> Result<TriggerSearch> {
    for pos in 0..event.tracks.len() {
        let Some(track) = event.tracks.row(pos) else {
            continue;
        };
        let inputs = track_inputs(event, track)?;

        let mut records = [ParticleRecord::placeholder(); 2];
        let mut found = false;
        for hypothesis in Hypothesis::ALL {
            let mut record = init_record(event, track, hypothesis, config);
            classify(&mut record, &inputs, calibration, config)?;
            found |= record.is_valid && record.is_trigger_electron;
            records[hypothesis.stream()] = record;
        }
        if found {
            return Ok(TriggerSearch {
                position: Some(pos),
                records,
            });
        }
    }
    Ok(TriggerSearch {
        position: None,
        records: [ParticleRecord::placeholder(); 2],
    })
}
