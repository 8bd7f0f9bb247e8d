//! Struct-of-sequences bank containers with typed row views.
//!
//! The event store hands each bank over as parallel columns indexed by row
//! position. These containers keep that layout (it is what the storage format
//! produces and it clusters well in cache) but algorithms never touch the
//! columns directly: every bank exposes `row(i)` returning a typed row view,
//! plus an iterator over rows.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

macro_rules! check_columns {
    ($bank:expr, $name:literal, $first:ident, $($col:ident),+ $(,)?) => {{
        let n = $bank.$first.len();
        if $( $bank.$col.len() != n )||+ {
            return Err(Error::InconsistentBank(concat!($name, " bank columns differ in length").into()));
        }
        Ok(())
    }};
}

/// Reconstructed-particle bank: one row per physical particle in the event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleBank {
    pub pid: Vec<i32>,
    pub px: Vec<f64>,
    pub py: Vec<f64>,
    pub pz: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
    pub vz: Vec<f64>,
    pub charge: Vec<i8>,
    pub beta: Vec<f64>,
    pub status: Vec<i16>,
}

/// Typed view of one particle-bank row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRow {
    pub pid: i32,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub charge: i8,
    pub beta: f64,
    pub status: i16,
}

impl ParticleBank {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pid.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pid.is_empty()
    }

    #[must_use]
    pub fn row(&self, pindex: usize) -> Option<ParticleRow> {
        if pindex >= self.len() {
            return None;
        }
        Some(ParticleRow {
            pid: self.pid[pindex],
            px: self.px[pindex],
            py: self.py[pindex],
            pz: self.pz[pindex],
            vx: self.vx[pindex],
            vy: self.vy[pindex],
            vz: self.vz[pindex],
            charge: self.charge[pindex],
            beta: self.beta[pindex],
            status: self.status[pindex],
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn push(
        &mut self,
        pid: i32,
        momentum: (f64, f64, f64),
        vertex: (f64, f64, f64),
        charge: i8,
        beta: f64,
        status: i16,
    ) {
        self.pid.push(pid);
        self.px.push(momentum.0);
        self.py.push(momentum.1);
        self.pz.push(momentum.2);
        self.vx.push(vertex.0);
        self.vy.push(vertex.1);
        self.vz.push(vertex.2);
        self.charge.push(charge);
        self.beta.push(beta);
        self.status.push(status);
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_columns!(self, "particle", pid, px, py, pz, vx, vy, vz, charge, beta, status)
    }
}

/// Track bank: one row per central-tracking fit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackBank {
    pub index: Vec<u32>,
    pub pindex: Vec<u32>,
    pub sector: Vec<i32>,
    pub ndf: Vec<i32>,
    pub chi2: Vec<f64>,
}

/// Typed view of one track-bank row.
///
/// `index` addresses the forward-tracker bank; `pindex` links back to the
/// particle bank and to calorimeter/Cherenkov/scintillator hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackCandidate {
    pub index: usize,
    pub pindex: usize,
    pub sector: i32,
    pub ndf: i32,
    pub chi2: f64,
}

impl TrackBank {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pindex.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pindex.is_empty()
    }

    #[must_use]
    pub fn row(&self, pos: usize) -> Option<TrackCandidate> {
        if pos >= self.len() {
            return None;
        }
        Some(TrackCandidate {
            index: self.index[pos] as usize,
            pindex: self.pindex[pos] as usize,
            sector: self.sector[pos],
            ndf: self.ndf[pos],
            chi2: self.chi2[pos],
        })
    }

    pub fn push(&mut self, index: u32, pindex: u32, sector: i32, ndf: i32, chi2: f64) {
        self.index.push(index);
        self.pindex.push(pindex);
        self.sector.push(sector);
        self.ndf.push(ndf);
        self.chi2.push(chi2);
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_columns!(self, "track", pindex, index, sector, ndf, chi2)
    }
}

/// Calorimeter hit bank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalorimeterBank {
    pub pindex: Vec<u32>,
    pub layer: Vec<i32>,
    pub sector: Vec<i32>,
    pub energy: Vec<f64>,
    pub time: Vec<f64>,
}

/// Typed view of one calorimeter hit. The layer id stays raw here; decoding
/// (and the fatal unknown-layer check) happens at aggregation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorimeterHit {
    pub pindex: usize,
    pub layer: i32,
    pub sector: i32,
    pub energy: f64,
    pub time: f64,
}

impl CalorimeterBank {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pindex.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pindex.is_empty()
    }

    #[must_use]
    pub fn row(&self, i: usize) -> Option<CalorimeterHit> {
        if i >= self.len() {
            return None;
        }
        Some(CalorimeterHit {
            pindex: self.pindex[i] as usize,
            layer: self.layer[i],
            sector: self.sector[i],
            energy: self.energy[i],
            time: self.time[i],
        })
    }

    /// Iterates all hits as typed rows.
    pub fn iter(&self) -> impl Iterator<Item = CalorimeterHit> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    pub fn push(&mut self, pindex: u32, layer: i32, sector: i32, energy: f64, time: f64) {
        self.pindex.push(pindex);
        self.layer.push(layer);
        self.sector.push(sector);
        self.energy.push(energy);
        self.time.push(time);
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_columns!(self, "calorimeter", pindex, layer, sector, energy, time)
    }
}

/// Cherenkov hit bank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CherenkovBank {
    pub pindex: Vec<u32>,
    pub detector: Vec<i32>,
    pub nphe: Vec<f64>,
}

/// Typed view of one Cherenkov hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CherenkovHit {
    pub pindex: usize,
    pub detector: i32,
    pub nphe: f64,
}

impl CherenkovBank {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pindex.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pindex.is_empty()
    }

    #[must_use]
    pub fn row(&self, i: usize) -> Option<CherenkovHit> {
        if i >= self.len() {
            return None;
        }
        Some(CherenkovHit {
            pindex: self.pindex[i] as usize,
            detector: self.detector[i],
            nphe: self.nphe[i],
        })
    }

    /// Iterates all hits as typed rows.
    pub fn iter(&self) -> impl Iterator<Item = CherenkovHit> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    pub fn push(&mut self, pindex: u32, detector: i32, nphe: f64) {
        self.pindex.push(pindex);
        self.detector.push(detector);
        self.nphe.push(nphe);
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_columns!(self, "cherenkov", pindex, detector, nphe)
    }
}

/// Scintillator hit bank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScintillatorBank {
    pub pindex: Vec<u32>,
    pub detector: Vec<i32>,
    pub layer: Vec<i32>,
    pub time: Vec<f64>,
}

/// Typed view of one scintillator hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScintillatorHit {
    pub pindex: usize,
    pub detector: i32,
    pub layer: i32,
    pub time: f64,
}

impl ScintillatorBank {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pindex.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pindex.is_empty()
    }

    #[must_use]
    pub fn row(&self, i: usize) -> Option<ScintillatorHit> {
        if i >= self.len() {
            return None;
        }
        Some(ScintillatorHit {
            pindex: self.pindex[i] as usize,
            detector: self.detector[i],
            layer: self.layer[i],
            time: self.time[i],
        })
    }

    /// Iterates all hits as typed rows.
    pub fn iter(&self) -> impl Iterator<Item = ScintillatorHit> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    pub fn push(&mut self, pindex: u32, detector: i32, layer: i32, time: f64) {
        self.pindex.push(pindex);
        self.detector.push(detector);
        self.layer.push(layer);
        self.time.push(time);
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_columns!(self, "scintillator", pindex, detector, layer, time)
    }
}

/// Forward-tracker bank: the independent momentum fit, addressed by the
/// track's `index` field. May have fewer rows than the track bank (not every
/// track is refit forward); a missing row means no forward hypothesis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForwardBank {
    pub ndf: Vec<i32>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
    pub vz: Vec<f64>,
    pub px: Vec<f64>,
    pub py: Vec<f64>,
    pub pz: Vec<f64>,
}

/// Typed view of one forward-tracker row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardTrack {
    pub ndf: i32,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
}

impl ForwardBank {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ndf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ndf.is_empty()
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<ForwardTrack> {
        if index >= self.len() {
            return None;
        }
        Some(ForwardTrack {
            ndf: self.ndf[index],
            vx: self.vx[index],
            vy: self.vy[index],
            vz: self.vz[index],
            px: self.px[index],
            py: self.py[index],
            pz: self.pz[index],
        })
    }

    pub fn push(&mut self, ndf: i32, vertex: (f64, f64, f64), momentum: (f64, f64, f64)) {
        self.ndf.push(ndf);
        self.vx.push(vertex.0);
        self.vy.push(vertex.1);
        self.vz.push(vertex.2);
        self.px.push(momentum.0);
        self.py.push(momentum.1);
        self.pz.push(momentum.2);
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_columns!(self, "forward", ndf, vx, vy, vz, px, py, pz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_bank_row_view() {
        let mut bank = ParticleBank::default();
        bank.push(11, (1.0, 0.0, 9.5), (0.1, 0.2, -25.0), -1, 0.999, -2210);
        bank.push(211, (0.5, 0.5, 2.0), (0.0, 0.0, -24.0), 1, 0.97, 110);

        assert_eq!(bank.len(), 2);
        let row = bank.row(1).unwrap();
        assert_eq!(row.pid, 211);
        assert_eq!(row.charge, 1);
        assert!(bank.row(2).is_none());
    }

    #[test]
    fn test_track_row_indices() {
        let mut bank = TrackBank::default();
        bank.push(0, 0, 1, 30, 12.5);
        let t = bank.row(0).unwrap();
        assert_eq!(t.index, 0);
        assert_eq!(t.pindex, 0);
        assert_eq!(t.ndf, 30);
    }

    #[test]
    fn test_calorimeter_iter_matches_rows() {
        let mut bank = CalorimeterBank::default();
        bank.push(0, 1, 2, 0.12, 55.0);
        bank.push(1, 4, 2, 0.08, 57.0);
        let hits: Vec<_> = bank.iter().collect();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], bank.row(0).unwrap());
        assert_eq!(hits[1].layer, 4);
    }

    #[test]
    fn test_forward_bank_missing_row() {
        let mut bank = ForwardBank::default();
        bank.push(3, (0.0, 0.0, -25.0), (0.9, 0.1, 8.8));
        assert!(bank.row(0).is_some());
        assert!(bank.row(1).is_none());
    }

    #[test]
    fn test_validate_catches_ragged_columns() {
        let bank = CherenkovBank {
            pindex: vec![0, 1],
            detector: vec![15],
            nphe: vec![10.0, 3.0],
        };
        assert!(bank.validate().is_err());
    }
}
