//! Closed-form lab-frame and SIDIS kinematics.
//!
//! All functions are pure. Angles are in radians, energies and momenta in
//! GeV. Inclusive quantities (Q², ν, x_B, W²) treat the particle as the
//! scattered electron probe with its mass neglected. The five hadron
//! quantities are defined relative to the virtual photon of a reference
//! trigger electron and return exactly `0.0` when that reference is the
//! no-trigger placeholder, so downstream rows carry zero sentinels rather
//! than NaN.

use sidisrec_core::particle::{ParticleId, ParticleRecord};

/// Momentum magnitude from 3-momentum components.
#[must_use]
pub fn momentum(px: f64, py: f64, pz: f64) -> f64 {
    (px * px + py * py + pz * pz).sqrt()
}

/// Lab polar angle relative to the beam axis.
#[must_use]
pub fn theta_lab(px: f64, py: f64, pz: f64) -> f64 {
    px.hypot(py).atan2(pz)
}

/// Lab azimuthal angle.
#[must_use]
pub fn phi_lab(px: f64, py: f64) -> f64 {
    py.atan2(px)
}

/// Four-momentum transfer squared, `4 E_b p sin²(θ/2)`.
#[must_use]
pub fn q2(beam_energy: f64, p: f64, theta: f64) -> f64 {
    4.0 * beam_energy * p * (theta / 2.0).sin().powi(2)
}

/// Energy transfer, `E_b − p`.
#[must_use]
pub fn nu(beam_energy: f64, p: f64) -> f64 {
    beam_energy - p
}

/// Bjorken scaling variable, `Q² / (2 M_p ν)`. Zero when ν vanishes.
#[must_use]
pub fn x_bjorken(beam_energy: f64, p: f64, theta: f64) -> f64 {
    let nu = nu(beam_energy, p);
    if nu == 0.0 {
        return 0.0;
    }
    q2(beam_energy, p, theta) / (2.0 * ParticleId::Proton.mass() * nu)
}

/// Invariant mass squared of the hadronic final state,
/// `M_p² + 2 M_p ν − Q²`.
#[must_use]
pub fn w2(beam_energy: f64, p: f64, theta: f64) -> f64 {
    let m = ParticleId::Proton.mass();
    m * m + 2.0 * m * nu(beam_energy, p) - q2(beam_energy, p, theta)
}

/// Virtual-photon 3-momentum for a scattered electron.
fn virtual_photon(electron: &ParticleRecord, beam_energy: f64) -> (f64, f64, f64) {
    (-electron.px, -electron.py, beam_energy - electron.pz)
}

/// Polar angle of the hadron relative to the virtual-photon direction.
#[must_use]
pub fn theta_pq(hadron: &ParticleRecord, electron: &ParticleRecord, beam_energy: f64) -> f64 {
    if electron.is_placeholder() {
        return 0.0;
    }
    let (qx, qy, qz) = virtual_photon(electron, beam_energy);
    let q_mag = momentum(qx, qy, qz);
    let h_mag = hadron.momentum();
    if q_mag == 0.0 || h_mag == 0.0 {
        return 0.0;
    }
    let cos = (qx * hadron.px + qy * hadron.py + qz * hadron.pz) / (q_mag * h_mag);
    cos.clamp(-1.0, 1.0).acos()
}

/// Azimuthal angle of the hadron around the virtual-photon direction.
///
/// Rotates the hadron momentum by −φ_q about z, then −θ_q about y, so the
/// photon lies on +z, and takes the azimuth of the result.
#[must_use]
pub fn phi_pq(hadron: &ParticleRecord, electron: &ParticleRecord, beam_energy: f64) -> f64 {
    if electron.is_placeholder() {
        return 0.0;
    }
    let (qx, qy, qz) = virtual_photon(electron, beam_energy);
    let phi_q = qy.atan2(qx);
    let theta_q = qx.hypot(qy).atan2(qz);

    let (sin_p, cos_p) = phi_q.sin_cos();
    let hx = hadron.px * cos_p + hadron.py * sin_p;
    let hy = -hadron.px * sin_p + hadron.py * cos_p;
    let hz = hadron.pz;

    let (sin_t, cos_t) = theta_q.sin_cos();
    let hx = hx * cos_t - hz * sin_t;

    hy.atan2(hx)
}

/// Fragmentation fraction, `E_h / ν`. Zero without a trigger electron or
/// when ν vanishes.
#[must_use]
pub fn z_h(hadron: &ParticleRecord, electron: &ParticleRecord, beam_energy: f64) -> f64 {
    if electron.is_placeholder() {
        return 0.0;
    }
    let nu = nu(beam_energy, electron.momentum());
    if nu == 0.0 {
        return 0.0;
    }
    let p = hadron.momentum();
    (hadron.mass * hadron.mass + p * p).sqrt() / nu
}

/// Squared hadron momentum transverse to the virtual photon.
#[must_use]
pub fn pt2(hadron: &ParticleRecord, electron: &ParticleRecord, beam_energy: f64) -> f64 {
    if electron.is_placeholder() {
        return 0.0;
    }
    let p = hadron.momentum();
    (p * theta_pq(hadron, electron, beam_energy).sin()).powi(2)
}

/// Squared hadron momentum along the virtual photon.
#[must_use]
pub fn pl2(hadron: &ParticleRecord, electron: &ParticleRecord, beam_energy: f64) -> f64 {
    if electron.is_placeholder() {
        return 0.0;
    }
    let p = hadron.momentum();
    (p * theta_pq(hadron, electron, beam_energy).cos()).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sidisrec_core::particle::ParticleId;

    fn electron(px: f64, py: f64, pz: f64) -> ParticleRecord {
        ParticleRecord {
            pid: ParticleId::Electron,
            mass: ParticleId::Electron.mass(),
            charge: -1,
            px,
            py,
            pz,
            is_valid: true,
            is_trigger_electron: true,
            ..ParticleRecord::default()
        }
    }

    fn pion(px: f64, py: f64, pz: f64) -> ParticleRecord {
        ParticleRecord {
            pid: ParticleId::PiPlus,
            mass: ParticleId::PiPlus.mass(),
            charge: 1,
            px,
            py,
            pz,
            is_valid: true,
            ..ParticleRecord::default()
        }
    }

    #[test]
    fn test_worked_example_beam_10_6() {
        // beam 10.6 GeV, electron (1.0, 0.0, 9.5); reference values worked
        // out by hand from the closed forms
        let beam = 10.6;
        let p = momentum(1.0, 0.0, 9.5);
        let theta = theta_lab(1.0, 0.0, 9.5);

        assert_relative_eq!(p, 9.552_486_587_3, max_relative = 1e-9);
        assert_relative_eq!(q2(beam, p, theta), 1.112_715_650_2, max_relative = 1e-6);
        assert_relative_eq!(nu(beam, p), 1.047_513_412_7, max_relative = 1e-6);
        assert_relative_eq!(x_bjorken(beam, p, theta), 0.566_064_41, max_relative = 1e-6);
        assert_relative_eq!(w2(beam, p, theta), 1.733_343_705, max_relative = 1e-6);
    }

    #[test]
    fn test_x_bjorken_and_w2_consistent() {
        let beam = 10.6;
        let p = momentum(1.0, 0.0, 9.5);
        let theta = theta_lab(1.0, 0.0, 9.5);
        let m = ParticleId::Proton.mass();

        let x = x_bjorken(beam, p, theta);
        assert_relative_eq!(
            x,
            q2(beam, p, theta) / (2.0 * m * nu(beam, p)),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            w2(beam, p, theta),
            m * m + 2.0 * m * nu(beam, p) - q2(beam, p, theta),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_hadron_along_photon_has_zero_pt() {
        let beam = 10.6;
        let e = electron(1.0, 0.0, 9.5);
        // hadron exactly along q = (-1, 0, 1.1)
        let h = pion(-1.0, 0.0, 1.1);

        assert_relative_eq!(theta_pq(&h, &e, beam), 0.0, epsilon = 1e-9);
        assert_relative_eq!(pt2(&h, &e, beam), 0.0, epsilon = 1e-9);
        assert_relative_eq!(
            pl2(&h, &e, beam),
            h.momentum().powi(2),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_phi_pq_quadrants() {
        let beam = 10.6;
        // electron along z keeps the photon on z, so phi_pq reduces to phi_lab
        let e = electron(0.0, 0.0, 9.5);
        let h = pion(0.5, 0.5, 2.0);
        assert_relative_eq!(
            phi_pq(&h, &e, beam),
            phi_lab(0.5, 0.5),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_placeholder_electron_zeroes_hadron_quantities() {
        let beam = 10.6;
        let e = ParticleRecord::placeholder();
        let h = pion(0.5, 0.5, 2.0);

        assert_eq!(theta_pq(&h, &e, beam), 0.0);
        assert_eq!(phi_pq(&h, &e, beam), 0.0);
        assert_eq!(z_h(&h, &e, beam), 0.0);
        assert_eq!(pt2(&h, &e, beam), 0.0);
        assert_eq!(pl2(&h, &e, beam), 0.0);
    }

    #[test]
    fn test_z_h_energy_fraction() {
        let beam = 10.6;
        let e = electron(1.0, 0.0, 9.5);
        let h = pion(-0.3, 0.1, 1.5);
        let nu = beam - e.momentum();
        let expected = (h.mass * h.mass + h.momentum().powi(2)).sqrt() / nu;
        assert_relative_eq!(z_h(&h, &e, beam), expected, max_relative = 1e-12);
        assert!(z_h(&h, &e, beam) > 0.0);
    }
}
