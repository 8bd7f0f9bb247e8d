//! Best-available time-of-flight resolution.
//!
//! Competing detector layers measure the same particle with very different
//! timing resolution. The resolver ranks the six usable layer combinations
//! explicitly and keeps the best-ranked hit seen so far; equal-or-worse hits
//! never replace the current choice, so the result is independent of hit
//! ordering in storage.

use sidisrec_core::banks::{CalorimeterBank, ScintillatorBank};
use sidisrec_core::detector::{CalorimeterLayer, FtofLayer, FTOF_DETECTOR_ID};

/// Time sources ranked from most to least precise. The derived `Ord` follows
/// declaration order, so "less" means "better".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TofSource {
    /// Forward TOF panel 1B.
    Ftof1b,
    /// Forward TOF panel 1A.
    Ftof1a,
    /// Forward TOF panel 2.
    Ftof2,
    /// Pre-shower calorimeter time.
    Pcal,
    /// Inner calorimeter time.
    EcalInner,
    /// Outer calorimeter time.
    EcalOuter,
}

impl TofSource {
    /// Precedence rank, 0 best.
    #[must_use]
    pub fn rank(self) -> u8 {
        self as u8
    }

    fn from_ftof(layer: FtofLayer) -> Self {
        match layer {
            FtofLayer::OneB => Self::Ftof1b,
            FtofLayer::OneA => Self::Ftof1a,
            FtofLayer::Two => Self::Ftof2,
        }
    }

    fn from_calorimeter(layer: CalorimeterLayer) -> Self {
        match layer {
            CalorimeterLayer::Pcal => Self::Pcal,
            CalorimeterLayer::EcalInner => Self::EcalInner,
            CalorimeterLayer::EcalOuter => Self::EcalOuter,
        }
    }
}

/// Resolves the most precise time-of-flight available for a particle.
///
/// Scans the forward TOF scintillator hits first, short-circuiting on panel
/// 1B. Calorimeter times are considered only when the particle has no forward
/// TOF hit at all. Returns `f64::INFINITY` when no measurement exists.
#[must_use]
pub fn resolve_tof(pindex: usize, scintillator: &ScintillatorBank, calorimeter: &CalorimeterBank) -> f64 {
    let mut best: Option<(TofSource, f64)> = None;

    for hit in scintillator.iter() {
        if hit.pindex != pindex || hit.detector != FTOF_DETECTOR_ID {
            continue;
        }
        let Some(layer) = FtofLayer::from_raw(hit.layer) else {
            continue;
        };
        let source = TofSource::from_ftof(layer);
        if best.is_none_or(|(current, _)| source < current) {
            best = Some((source, hit.time));
        }
        if source == TofSource::Ftof1b {
            break; // things won't get better than this
        }
    }

    if best.is_none() {
        for hit in calorimeter.iter() {
            if hit.pindex != pindex {
                continue;
            }
            let Ok(layer) = CalorimeterLayer::from_raw(hit.layer) else {
                continue;
            };
            let source = TofSource::from_calorimeter(layer);
            if best.is_none_or(|(current, _)| source < current) {
                best = Some((source, hit.time));
            }
            if source == TofSource::Pcal {
                break;
            }
        }
    }

    best.map_or(f64::INFINITY, |(_, time)| time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order_is_total() {
        let ordered = [
            TofSource::Ftof1b,
            TofSource::Ftof1a,
            TofSource::Ftof2,
            TofSource::Pcal,
            TofSource::EcalInner,
            TofSource::EcalOuter,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_better_layer_wins_regardless_of_order() {
        let mut sci = ScintillatorBank::default();
        sci.push(0, FTOF_DETECTOR_ID, 3, 40.0); // panel 2 first in storage
        sci.push(0, FTOF_DETECTOR_ID, 1, 35.0); // panel 1A later
        let cal = CalorimeterBank::default();
        assert_eq!(resolve_tof(0, &sci, &cal), 35.0);

        let mut sci_rev = ScintillatorBank::default();
        sci_rev.push(0, FTOF_DETECTOR_ID, 1, 35.0);
        sci_rev.push(0, FTOF_DETECTOR_ID, 3, 40.0);
        assert_eq!(resolve_tof(0, &sci_rev, &cal), 35.0);
    }

    #[test]
    fn test_panel_1b_short_circuits() {
        let mut sci = ScintillatorBank::default();
        sci.push(0, FTOF_DETECTOR_ID, 2, 33.0); // 1B
        sci.push(0, FTOF_DETECTOR_ID, 2, 31.0); // later 1B hit is ignored
        let cal = CalorimeterBank::default();
        assert_eq!(resolve_tof(0, &sci, &cal), 33.0);
    }

    #[test]
    fn test_ftof2_beats_calorimeter() {
        let mut sci = ScintillatorBank::default();
        sci.push(0, FTOF_DETECTOR_ID, 3, 42.0);
        let mut cal = CalorimeterBank::default();
        cal.push(0, 4, 1, 0.1, 38.0); // ECIN time present but never consulted
        assert_eq!(resolve_tof(0, &sci, &cal), 42.0);
    }

    #[test]
    fn test_calorimeter_fallback_precedence() {
        let sci = ScintillatorBank::default();
        let mut cal = CalorimeterBank::default();
        cal.push(0, 7, 1, 0.05, 50.0); // ECOU
        cal.push(0, 4, 1, 0.10, 48.0); // ECIN replaces it
        assert_eq!(resolve_tof(0, &sci, &cal), 48.0);
    }

    #[test]
    fn test_wrong_pindex_and_detector_ignored() {
        let mut sci = ScintillatorBank::default();
        sci.push(1, FTOF_DETECTOR_ID, 2, 30.0); // other particle
        sci.push(0, 7, 2, 29.0); // not forward TOF
        let cal = CalorimeterBank::default();
        assert_eq!(resolve_tof(0, &sci, &cal), f64::INFINITY);
    }
}
