//! One event's worth of detector banks.

use serde::{Deserialize, Serialize};

use crate::banks::{
    CalorimeterBank, CherenkovBank, ForwardBank, ParticleBank, ScintillatorBank, TrackBank,
};
use crate::error::Result;

/// The fixed set of banks the reconstruction reads, as produced per event by
/// the columnar store. Lifetime is one event iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub particles: ParticleBank,
    #[serde(default)]
    pub tracks: TrackBank,
    #[serde(default)]
    pub calorimeter: CalorimeterBank,
    #[serde(default)]
    pub cherenkov: CherenkovBank,
    #[serde(default)]
    pub scintillator: ScintillatorBank,
    #[serde(default)]
    pub forward: ForwardBank,
}

impl Event {
    /// True when the particle or track bank is empty; such events emit no
    /// rows on either stream.
    #[must_use]
    pub fn missing_banks(&self) -> bool {
        self.particles.is_empty() || self.tracks.is_empty()
    }

    /// Checks that every bank's columns agree in length.
    ///
    /// # Errors
    /// Returns [`crate::Error::InconsistentBank`] naming the offending bank.
    pub fn validate(&self) -> Result<()> {
        self.particles.validate()?;
        self.tracks.validate()?;
        self.calorimeter.validate()?;
        self.cherenkov.validate()?;
        self.scintillator.validate()?;
        self.forward.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_event_misses_banks() {
        let event = Event::default();
        assert!(event.missing_banks());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_event_with_banks() {
        let mut event = Event::default();
        event
            .particles
            .push(11, (1.0, 0.0, 9.5), (0.0, 0.0, -25.0), -1, 0.999, -2210);
        event.tracks.push(0, 0, 1, 30, 10.0);
        assert!(!event.missing_banks());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let mut event = Event::default();
        event
            .particles
            .push(211, (0.5, 0.5, 2.0), (0.0, 0.0, -24.0), 1, 0.97, 110);
        event.tracks.push(0, 0, 2, 25, 8.0);
        event.cherenkov.push(0, 15, 4.0);

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
