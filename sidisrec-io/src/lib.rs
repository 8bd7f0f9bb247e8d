//! sidisrec-io: Event-store reading and row export for sidisrec.
//!
//! Events arrive as line-delimited JSON banks read through a shared memory
//! mapping; calibration tables come from plain-text coefficient files; output
//! rows leave as CSV or packed binary.
//!

mod calibration;
mod error;
mod reader;
mod writer;

pub use calibration::load_calibration;
pub use error::{Error, Result};
pub use reader::MappedEventReader;
pub use writer::RowWriter;
