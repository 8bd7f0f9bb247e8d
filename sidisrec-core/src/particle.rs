//! Particle identities and the classified particle record.

/// Rest masses in GeV.
mod mass {
    pub const ELECTRON: f64 = 0.000_510_999;
    pub const PION: f64 = 0.139_570;
    pub const KAON: f64 = 0.493_677;
    pub const PROTON: f64 = 0.938_272;
    pub const NEUTRON: f64 = 0.939_565;
}

/// Closed set of particle identities assigned by the classifier.
///
/// Carries the standard LUND integer code and the fixed rest mass for each
/// species. `Unknown` (code 0, mass 0) covers tracks whose hint matches no
/// supported branch; such tracks are still emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticleId {
    Electron,
    Positron,
    PiPlus,
    PiMinus,
    KPlus,
    KMinus,
    Proton,
    Neutron,
    Photon,
    #[default]
    Unknown,
}

impl ParticleId {
    /// The LUND integer code.
    #[must_use]
    pub fn lund(self) -> i32 {
        match self {
            Self::Electron => 11,
            Self::Positron => -11,
            Self::PiPlus => 211,
            Self::PiMinus => -211,
            Self::KPlus => 321,
            Self::KMinus => -321,
            Self::Proton => 2212,
            Self::Neutron => 2112,
            Self::Photon => 22,
            Self::Unknown => 0,
        }
    }

    /// Rest mass in GeV.
    #[must_use]
    pub fn mass(self) -> f64 {
        match self {
            Self::Electron | Self::Positron => mass::ELECTRON,
            Self::PiPlus | Self::PiMinus => mass::PION,
            Self::KPlus | Self::KMinus => mass::KAON,
            Self::Proton => mass::PROTON,
            Self::Neutron => mass::NEUTRON,
            Self::Photon | Self::Unknown => 0.0,
        }
    }

    /// Hadron/photon/neutron branch of the classifier: identity from the
    /// measured charge sign and the storage pid hint, once the electron
    /// hypothesis has been rejected.
    #[must_use]
    pub fn from_hint(charge: i8, hint: i32) -> Self {
        if charge == 0 {
            return match hint {
                22 => Self::Photon,
                2112 => Self::Neutron,
                _ => Self::Unknown,
            };
        }
        match hint.abs() {
            211 => {
                if charge > 0 {
                    Self::PiPlus
                } else {
                    Self::PiMinus
                }
            }
            321 => {
                if charge > 0 {
                    Self::KPlus
                } else {
                    Self::KMinus
                }
            }
            2212 => Self::Proton,
            _ => Self::Unknown,
        }
    }
}

/// A classified particle under one momentum-reconstruction hypothesis.
///
/// Produced fresh per track per hypothesis; never persisted by the storage
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleRecord {
    pub pid: ParticleId,
    pub charge: i8,
    pub mass: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub beta: f64,
    pub is_valid: bool,
    pub is_trigger_electron: bool,
}

impl ParticleRecord {
    /// The zero-valued placeholder substituted when an event has no trigger
    /// electron, so electron-relative kinematics stay well-defined.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Momentum magnitude in GeV.
    #[must_use]
    pub fn momentum(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// True when this record is the no-trigger-electron placeholder (zero
    /// momentum carries no direction to compute against).
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.px == 0.0 && self.py == 0.0 && self.pz == 0.0
    }
}
