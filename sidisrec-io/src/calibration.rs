//! Sampling-fraction calibration file loader.
//!
//! The calibration file is plain text: one line per sector in sector order,
//! eight whitespace-separated floats per line (four mean coefficients, then
//! four sigma coefficients). Lines starting with `#` and blank lines are
//! ignored.

use crate::{Error, Result};
use sidisrec_core::calibration::{CalibrationTable, SamplingFraction, SF_PARAM_COUNT};
use sidisrec_core::detector::SECTOR_COUNT;
use std::fs;
use std::path::Path;

fn malformed(path: &Path, detail: String) -> Error {
    Error::Core(sidisrec_core::Error::Calibration(format!(
        "{} (file: {})",
        detail,
        path.display()
    )))
}

/// Loads a per-run calibration table.
///
/// # Errors
/// Fails when the file cannot be read, a coefficient does not parse, a line
/// has the wrong number of coefficients, or the sector count is not six.
pub fn load_calibration<P: AsRef<Path>>(path: P) -> Result<CalibrationTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;

    let mut sectors = Vec::with_capacity(SECTOR_COUNT);
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let values = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| {
                    malformed(path, format!("line {}: bad coefficient {token:?}", line_no + 1))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if values.len() != 2 * SF_PARAM_COUNT {
            return Err(malformed(
                path,
                format!(
                    "line {}: expected {} coefficients, got {}",
                    line_no + 1,
                    2 * SF_PARAM_COUNT,
                    values.len()
                ),
            ));
        }
        let mut mean = [0.0; SF_PARAM_COUNT];
        let mut sigma = [0.0; SF_PARAM_COUNT];
        mean.copy_from_slice(&values[..SF_PARAM_COUNT]);
        sigma.copy_from_slice(&values[SF_PARAM_COUNT..]);
        sectors.push(SamplingFraction { mean, sigma });
    }

    let count = sectors.len();
    let sectors: [SamplingFraction; SECTOR_COUNT] = sectors
        .try_into()
        .map_err(|_| malformed(path, format!("expected {SECTOR_COUNT} sectors, got {count}")))?;
    Ok(CalibrationTable::new(sectors))
}
