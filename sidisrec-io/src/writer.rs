//! Output-row writers.

use crate::Result;
use sidisrec_core::record::{SidisRow, CSV_HEADER};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Buffered writer for one output stream of reconstructed rows.
pub struct RowWriter {
    writer: BufWriter<File>,
}

impl RowWriter {
    /// Creates the output file, truncating any existing content.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Writes rows as CSV with a header line.
    ///
    /// # Errors
    /// Returns an error on write failure.
    pub fn write_csv(&mut self, rows: &[SidisRow]) -> Result<()> {
        writeln!(self.writer, "{CSV_HEADER}")?;
        for row in rows {
            writeln!(
                self.writer,
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
                row.run,
                row.event,
                row.beam_energy,
                row.pid,
                row.status,
                row.charge,
                row.mass,
                row.vx,
                row.vy,
                row.vz,
                row.px,
                row.py,
                row.pz,
                row.p,
                row.theta,
                row.phi,
                row.beta,
                row.chi2,
                row.ndf,
                row.pcal_energy,
                row.inner_energy,
                row.outer_energy,
                row.total_energy,
                row.delta_tof,
                row.q2,
                row.nu,
                row.x_bjorken,
                row.w2,
                row.z_h,
                row.pt2,
                row.pl2,
                row.phi_pq,
                row.theta_pq,
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Writes rows as packed little-endian `f64` arrays, 33 values per row.
    ///
    /// # Errors
    /// Returns an error on write failure.
    pub fn write_binary(&mut self, rows: &[SidisRow]) -> Result<()> {
        for row in rows {
            for value in row.as_array() {
                self.writer.write_all(&value.to_le_bytes())?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes the writer.
    ///
    /// # Errors
    /// Returns an error on flush failure.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
