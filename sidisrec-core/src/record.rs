//! The fixed-field output row.

use serde::{Deserialize, Serialize};

/// Number of fields in an output row.
pub const FIELD_COUNT: usize = 33;

/// CSV header matching [`SidisRow::as_array`] order.
pub const CSV_HEADER: &str = "run,event,beam_energy,pid,status,charge,mass,\
vx,vy,vz,px,py,pz,p,theta,phi,beta,chi2,ndf,\
pcal_energy,inner_energy,outer_energy,total_energy,delta_tof,\
q2,nu,x_bjorken,w2,z_h,pt2,pl2,phi_pq,theta_pq";

/// One reconstructed-particle output row.
///
/// Two of these streams exist per run, one per momentum-reconstruction
/// hypothesis. The five hadron fields (`z_h` through `theta_pq`) are zero on
/// the trigger electron's own row and on every row of an event without a
/// trigger electron.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SidisRow {
    pub run: u32,
    pub event: u32,
    pub beam_energy: f64,
    pub pid: i32,
    pub status: i16,
    pub charge: i8,
    pub mass: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub p: f64,
    pub theta: f64,
    pub phi: f64,
    pub beta: f64,
    pub chi2: f64,
    pub ndf: f64,
    pub pcal_energy: f64,
    pub inner_energy: f64,
    pub outer_energy: f64,
    pub total_energy: f64,
    pub delta_tof: f64,
    pub q2: f64,
    pub nu: f64,
    pub x_bjorken: f64,
    pub w2: f64,
    pub z_h: f64,
    pub pt2: f64,
    pub pl2: f64,
    pub phi_pq: f64,
    pub theta_pq: f64,
}

impl SidisRow {
    /// All fields as `f64` in header order, for binary export and tests.
    #[must_use]
    pub fn as_array(&self) -> [f64; FIELD_COUNT] {
        [
            f64::from(self.run),
            f64::from(self.event),
            self.beam_energy,
            f64::from(self.pid),
            f64::from(self.status),
            f64::from(self.charge),
            self.mass,
            self.vx,
            self.vy,
            self.vz,
            self.px,
            self.py,
            self.pz,
            self.p,
            self.theta,
            self.phi,
            self.beta,
            self.chi2,
            self.ndf,
            self.pcal_energy,
            self.inner_energy,
            self.outer_energy,
            self.total_energy,
            self.delta_tof,
            self.q2,
            self.nu,
            self.x_bjorken,
            self.w2,
            self.z_h,
            self.pt2,
            self.pl2,
            self.phi_pq,
            self.theta_pq,
        ]
    }
}
