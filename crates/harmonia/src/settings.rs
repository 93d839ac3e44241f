use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::CIRCLE;

pub const EDGE_HARMONIC_DEFAULT: u32 = 108;
pub const ORB_DIVISOR_DEFAULT: u32 = 30;
pub const HALF_ORBS_FOR_DOUBLES_DEFAULT: bool = true;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("edge harmonic must be positive")]
    ZeroEdgeHarmonic,
    #[error("orb divisor must be positive")]
    ZeroOrbDivisor,
}

/// Parameters of every resonance computation.
///
/// Passed explicitly into matrix and pattern construction; a matrix keeps
/// the copy it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ResonanceSettings {
    /// Highest harmonic examined.
    pub edge_harmonic: u32,
    /// The primary orb is the circle divided by this number.
    pub orb_divisor: u32,
    /// Halve the orb for pairs of points from different charts.
    pub half_orbs_for_doubles: bool,
}

impl Default for ResonanceSettings {
    fn default() -> Self {
        Self {
            edge_harmonic: EDGE_HARMONIC_DEFAULT,
            orb_divisor: ORB_DIVISOR_DEFAULT,
            half_orbs_for_doubles: HALF_ORBS_FOR_DOUBLES_DEFAULT,
        }
    }
}

impl ResonanceSettings {
    pub fn new(edge_harmonic: u32, orb_divisor: u32, half_orbs_for_doubles: bool) -> Self {
        Self {
            edge_harmonic,
            orb_divisor,
            half_orbs_for_doubles,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.edge_harmonic == 0 {
            return Err(SettingsError::ZeroEdgeHarmonic);
        }
        if self.orb_divisor == 0 {
            return Err(SettingsError::ZeroOrbDivisor);
        }
        Ok(())
    }

    /// Primary orb in degrees (12° with the default divisor).
    pub fn primal_orb(&self) -> f64 {
        CIRCLE / self.orb_divisor.max(1) as f64
    }

    /// Effective orb for a pair of points, or for a pattern spanning one or
    /// several charts.
    pub fn orb_for(&self, same_chart: bool) -> f64 {
        if !same_chart && self.half_orbs_for_doubles {
            self.primal_orb() / 2.0
        } else {
            self.primal_orb()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ResonanceSettings::default();
        assert_eq!(settings.edge_harmonic, 108);
        assert_eq!(settings.orb_divisor, 30);
        assert!(settings.half_orbs_for_doubles);
        assert_eq!(settings.primal_orb(), 12.0);
        assert_eq!(settings.orb_for(true), 12.0);
        assert_eq!(settings.orb_for(false), 6.0);
    }

    #[test]
    fn test_no_halving_when_disabled() {
        let settings = ResonanceSettings::new(12, 45, false);
        assert_eq!(settings.orb_for(false), 8.0);
    }

    #[test]
    fn test_validate() {
        assert!(ResonanceSettings::default().validate().is_ok());
        assert_eq!(
            ResonanceSettings::new(0, 30, true).validate(),
            Err(SettingsError::ZeroEdgeHarmonic)
        );
        assert_eq!(
            ResonanceSettings::new(108, 0, true).validate(),
            Err(SettingsError::ZeroOrbDivisor)
        );
    }
}
