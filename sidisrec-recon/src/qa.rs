//! Debug-mode classification quality summary.
//!
//! Tallies how the classifier's assignments line up with the storage pid
//! hints, species by species, and renders the row-normalized matrix for the
//! end-of-run report.

use std::fmt::Write as _;

const SPECIES: [(&str, i32); 6] = [
    ("e", 11),
    ("pi", 211),
    ("K", 321),
    ("p", 2212),
    ("n", 2112),
    ("gamma", 22),
];

fn species_index(lund: i32) -> Option<usize> {
    SPECIES.iter().position(|&(_, code)| code == lund.abs())
}

/// Hint-versus-assignment tally over all classified tracks.
///
/// Rows are the storage hint species, columns the assigned species. Codes
/// outside the six tracked species are not tallied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PidMatrix {
    counts: [[u64; 6]; 6],
    totals: [u64; 6],
}

impl PidMatrix {
    /// Tallies one classified track.
    pub fn record(&mut self, hint: i32, assigned: i32) {
        let (Some(row), Some(col)) = (species_index(hint), species_index(assigned)) else {
            return;
        };
        self.counts[row][col] += 1;
        self.totals[row] += 1;
    }

    /// Total tracks tallied.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.totals.iter().sum()
    }

    /// Fraction of hint species `hint` assigned as species `assigned`.
    /// Zero when the hint species was never seen.
    #[must_use]
    pub fn fraction(&self, hint: i32, assigned: i32) -> f64 {
        let (Some(row), Some(col)) = (species_index(hint), species_index(assigned)) else {
            return 0.0;
        };
        if self.totals[row] == 0 {
            return 0.0;
        }
        self.counts[row][col] as f64 / self.totals[row] as f64
    }

    /// Renders the row-normalized matrix as a fixed-width table.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("hint \\ assigned");
        for (name, _) in SPECIES {
            let _ = write!(out, "{name:>9}");
        }
        out.push('\n');
        for (row, (name, _)) in SPECIES.iter().enumerate() {
            let _ = write!(out, "{name:>15}");
            for col in 0..SPECIES.len() {
                let frac = if self.totals[row] == 0 {
                    0.0
                } else {
                    self.counts[row][col] as f64 / self.totals[row] as f64
                };
                let _ = write!(out, "{frac:>9.4}");
            }
            let _ = writeln!(out, "  ({} tracks)", self.totals[row]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions_normalize_per_hint() {
        let mut m = PidMatrix::default();
        m.record(11, 11);
        m.record(11, 11);
        m.record(11, 211);
        m.record(-211, -211);

        assert_eq!(m.total(), 4);
        assert!((m.fraction(11, 11) - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.fraction(11, 211) - 1.0 / 3.0).abs() < 1e-12);
        assert!((m.fraction(211, 211) - 1.0).abs() < 1e-12);
        assert_eq!(m.fraction(2212, 2212), 0.0);
    }

    #[test]
    fn test_untracked_codes_ignored() {
        let mut m = PidMatrix::default();
        m.record(13, 11); // muon hint is not tracked
        m.record(11, 0); // unknown assignment is not tracked
        assert_eq!(m.total(), 0);
    }

    #[test]
    fn test_render_has_header_and_six_rows() {
        let mut m = PidMatrix::default();
        m.record(321, 321);
        let text = m.render();
        assert_eq!(text.lines().count(), 7);
        assert!(text.starts_with("hint \\ assigned"));
        assert!(text.contains("(1 tracks)"));
    }
}
