//! sidisrec-recon: The event reconstruction and classification pipeline.
//!
//! Per event, the pipeline resolves each particle's best time-of-flight,
//! aggregates calorimeter energy and Cherenkov photoelectrons, classifies
//! particles under two independent momentum-reconstruction hypotheses,
//! selects the trigger electron, and computes SIDIS kinematics relative
//! to it.
//!
#![warn(missing_docs)]

mod aggregate;
mod classify;
pub mod kinematics;
mod processor;
mod qa;
mod tof;
mod trigger;

pub use aggregate::{sum_calorimeter, sum_cherenkov, CalorimeterSums, CherenkovSums};
pub use classify::{classify, init_record, ClassifierConfig, ClassificationInputs, Hypothesis};
pub use processor::{EventProcessor, EventRows};
pub use qa::PidMatrix;
pub use tof::{resolve_tof, TofSource};
pub use trigger::{find_trigger_electron, TriggerSearch};
