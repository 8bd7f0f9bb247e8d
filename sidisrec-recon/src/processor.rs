//! Event-loop orchestration: banks in, output rows out.
//!
//! Per event the processor resolves the reference time-of-flight from the
//! leading track, runs the trigger-electron scan, then walks the remaining
//! tracks and emits one row per valid record per hypothesis. Events are
//! independent; the parallel path processes them with rayon and merges the
//! per-event row groups back in bank order, so sequential and parallel runs
//! produce identical output.

use rayon::prelude::*;

use sidisrec_core::calibration::CalibrationTable;
use sidisrec_core::error::Result;
use sidisrec_core::event::Event;
use sidisrec_core::particle::ParticleRecord;
use sidisrec_core::record::SidisRow;

use crate::classify::{classify, init_record, ClassificationInputs, ClassifierConfig, Hypothesis};
use crate::kinematics;
use crate::qa::PidMatrix;
use crate::tof::resolve_tof;
use crate::trigger::{find_trigger_electron, track_inputs};

/// Output rows split by momentum-reconstruction hypothesis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRows {
    /// Central-tracking stream.
    pub central: Vec<SidisRow>,
    /// Forward-refit stream.
    pub forward: Vec<SidisRow>,
}

impl EventRows {
    /// True when neither stream has rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.central.is_empty() && self.forward.is_empty()
    }

    fn push(&mut self, hypothesis: Hypothesis, row: SidisRow) {
        match hypothesis {
            Hypothesis::Central => self.central.push(row),
            Hypothesis::Forward => self.forward.push(row),
        }
    }

    fn extend(&mut self, other: Self) {
        self.central.extend(other.central);
        self.forward.extend(other.forward);
    }
}

/// Stateless (per event) reconstruction driver for one run.
#[derive(Debug, Clone)]
pub struct EventProcessor {
    run: u32,
    beam_energy: f64,
    calibration: CalibrationTable,
    config: ClassifierConfig,
}

impl EventProcessor {
    /// Builds a processor for one run with default cuts.
    #[must_use]
    pub fn new(run: u32, beam_energy: f64, calibration: CalibrationTable) -> Self {
        Self {
            run,
            beam_energy,
            calibration,
            config: ClassifierConfig::default(),
        }
    }

    /// Overrides the classification cuts.
    #[must_use]
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Processes one event into its row groups.
    ///
    /// The trigger electron's own rows carry zero hadron fields; every other
    /// valid record yields a row with kinematics measured against its
    /// hypothesis' trigger reference. Events without particle or track banks
    /// emit nothing.
    ///
    /// # Errors
    /// Fatal detector-geometry errors (unknown calorimeter layer, unknown
    /// Cherenkov detector, sector outside 1..=6) abort the event.
    pub fn process_event(
        &self,
        event_id: u32,
        event: &Event,
        mut qa: Option<&mut PidMatrix>,
    ) -> Result<EventRows> {
        let mut rows = EventRows::default();
        if event.missing_banks() {
            return Ok(rows);
        }

        // Leading-track time anchors every delta-TOF in the event.
        let reference_tof = match event.tracks.row(0) {
            Some(track) => resolve_tof(track.pindex, &event.scintillator, &event.calorimeter),
            None => f64::INFINITY,
        };

        let trigger = find_trigger_electron(event, &self.calibration, &self.config)?;

        if let Some(pos) = trigger.position {
            let Some(track) = event.tracks.row(pos) else {
                return Ok(rows);
            };
            let inputs = track_inputs(event, track)?;
            let tof = resolve_tof(track.pindex, &event.scintillator, &event.calorimeter);
            for hypothesis in Hypothesis::ALL {
                let record = trigger.record(hypothesis);
                // Electron-relative fields are zero on the electron's own row.
                let row = self.make_row(
                    event_id,
                    record,
                    &inputs,
                    track.chi2,
                    track.ndf,
                    tof - reference_tof,
                    &ParticleRecord::placeholder(),
                );
                rows.push(hypothesis, row);
            }
        }

        for pos in 0..event.tracks.len() {
            if Some(pos) == trigger.position {
                continue;
            }
            let Some(track) = event.tracks.row(pos) else {
                continue;
            };
            let inputs = track_inputs(event, track)?;
            let tof = resolve_tof(track.pindex, &event.scintillator, &event.calorimeter);

            for hypothesis in Hypothesis::ALL {
                let mut record = init_record(event, track, hypothesis, &self.config);
                classify(&mut record, &inputs, &self.calibration, &self.config)?;
                if hypothesis == Hypothesis::Central {
                    if let Some(qa) = qa.as_deref_mut() {
                        qa.record(inputs.hint, record.pid.lund());
                    }
                }
                if !record.is_valid {
                    continue;
                }
                let row = self.make_row(
                    event_id,
                    &record,
                    &inputs,
                    track.chi2,
                    track.ndf,
                    tof - reference_tof,
                    trigger.record(hypothesis),
                );
                rows.push(hypothesis, row);
            }
        }
        Ok(rows)
    }

    /// Processes events in order, optionally capped and with a QA tally.
    ///
    /// # Errors
    /// Stops at the first event with a fatal detector-geometry error.
    pub fn process_events(
        &self,
        events: &[Event],
        max_events: Option<usize>,
        mut qa: Option<&mut PidMatrix>,
    ) -> Result<EventRows> {
        let limit = max_events.unwrap_or(events.len()).min(events.len());
        let mut rows = EventRows::default();
        for (id, event) in events[..limit].iter().enumerate() {
            rows.extend(self.process_event(id as u32, event, qa.as_deref_mut())?);
        }
        Ok(rows)
    }

    /// Parallel counterpart of [`Self::process_events`]. Row order matches
    /// the sequential path exactly; the QA tally is sequential-only.
    ///
    /// # Errors
    /// Fails if any event hits a fatal detector-geometry error.
    pub fn process_events_par(
        &self,
        events: &[Event],
        max_events: Option<usize>,
    ) -> Result<EventRows> {
        let limit = max_events.unwrap_or(events.len()).min(events.len());
        let groups: Vec<EventRows> = events[..limit]
            .par_iter()
            .enumerate()
            .map(|(id, event)| self.process_event(id as u32, event, None))
            .collect::<Result<_>>()?;

        let mut rows = EventRows::default();
        for group in groups {
            rows.extend(group);
        }
        Ok(rows)
    }

    #[allow(clippy::too_many_arguments)]
    fn make_row(
        &self,
        event_id: u32,
        record: &ParticleRecord,
        inputs: &ClassificationInputs,
        chi2: f64,
        ndf: i32,
        delta_tof: f64,
        reference: &ParticleRecord,
    ) -> SidisRow {
        let p = record.momentum();
        let theta = kinematics::theta_lab(record.px, record.py, record.pz);
        SidisRow {
            run: self.run,
            event: event_id,
            beam_energy: self.beam_energy,
            pid: record.pid.lund(),
            status: inputs.status,
            charge: record.charge,
            mass: record.mass,
            vx: record.vx,
            vy: record.vy,
            vz: record.vz,
            px: record.px,
            py: record.py,
            pz: record.pz,
            p,
            theta,
            phi: kinematics::phi_lab(record.px, record.py),
            beta: record.beta,
            chi2,
            ndf: f64::from(ndf),
            pcal_energy: inputs.calorimeter.pcal,
            inner_energy: inputs.calorimeter.inner,
            outer_energy: inputs.calorimeter.outer,
            total_energy: inputs.calorimeter.total,
            delta_tof,
            q2: kinematics::q2(self.beam_energy, p, theta),
            nu: kinematics::nu(self.beam_energy, p),
            x_bjorken: kinematics::x_bjorken(self.beam_energy, p, theta),
            w2: kinematics::w2(self.beam_energy, p, theta),
            z_h: kinematics::z_h(record, reference, self.beam_energy),
            pt2: kinematics::pt2(record, reference, self.beam_energy),
            pl2: kinematics::pl2(record, reference, self.beam_energy),
            phi_pq: kinematics::phi_pq(record, reference, self.beam_energy),
            theta_pq: kinematics::theta_pq(record, reference, self.beam_energy),
        }
    }
}
