use std::fmt::{self, Display};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fixture::Rgb;

/// Static configuration of a light rig.
///
/// The palette is fixed at three entries by construction: modes 1 and 2 light
/// the whole rig with entries 0 and 1, the chase lights a single fixture with
/// entry 2. A rig with zero fixtures is legal (the chase must no-op on it),
/// everything else is checked by [`validate`](Self::validate) before a
/// controller is allowed to exist.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RigConfig {
    /// Number of fixtures in the rig
    pub fixture_count: u32,
    /// Solid color A, solid color B, chase color
    pub palette: [Rgb; 3],
    /// Emission intensity factor applied to every palette entry
    pub intensity: f32,
    /// Delay between chase steps
    pub step_delay: Duration,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            fixture_count: 8,
            palette: [
                Rgb::new(1.0, 0.55, 0.15),
                Rgb::new(0.15, 0.55, 1.0),
                Rgb::new(1.0, 1.0, 1.0),
            ],
            intensity: 3.0,
            step_delay: Duration::from_millis(50),
        }
    }
}

impl RigConfig {
    /// Fail-fast configuration check, run once at initialization.
    ///
    /// A bad palette or intensity would otherwise surface as garbage colors
    /// deep inside the visual refresh, and a zero step delay would turn the
    /// chase into a busy loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.intensity.is_finite() || self.intensity < 0. {
            return Err(ConfigError::BadIntensity(self.intensity));
        }

        for (index, color) in self.palette.iter().enumerate() {
            let Rgb(channels) = color;
            if channels.iter().any(|c| !c.is_finite() || *c < 0.) {
                return Err(ConfigError::BadPaletteEntry(index));
            }
        }

        if self.step_delay.is_zero() {
            return Err(ConfigError::ZeroStepDelay);
        }

        Ok(())
    }
}

/// Rejected rig configuration
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Intensity factor is negative or non-finite
    BadIntensity(f32),
    /// Palette entry at this index has a negative or non-finite channel
    BadPaletteEntry(usize),
    /// Chase step delay of zero
    ZeroStepDelay,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::BadIntensity(v) => write!(f, "Emission intensity {} is not usable", v),
            ConfigError::BadPaletteEntry(i) => {
                write!(f, "Palette entry {} has a negative or non-finite channel", i)
            }
            ConfigError::ZeroStepDelay => write!(f, "Chase step delay must be nonzero"),
        }
    }
}

impl std::error::Error for ConfigError {}
