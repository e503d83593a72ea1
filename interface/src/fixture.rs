//! Types for interfacing with the host's fixture rendering primitive
use serde::{Deserialize, Serialize};

/// Linear RGB color
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const BLACK: Self = Self([0.; 3]);

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    /// Scale each channel by the given intensity factor
    pub fn scale(self, intensity: f32) -> Self {
        let Self([r, g, b]) = self;
        Self([r * intensity, g * intensity, b * intensity])
    }
}

/// Index of a fixture within the rig, 0..N-1
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixtureId(pub u32);

/// Per-fixture emissive render state
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Emissive {
    /// Emissive color, already intensity-scaled
    pub color: Rgb,
    /// Whether the emission keyword is enabled on the fixture's material
    pub enabled: bool,
}

impl Emissive {
    /// Black, emission disabled; the dark state of a fixture
    pub fn off() -> Self {
        Self {
            color: Rgb::BLACK,
            enabled: false,
        }
    }

    /// The given color with emission enabled
    pub fn lit(color: Rgb) -> Self {
        Self {
            color,
            enabled: true,
        }
    }
}

impl Default for Emissive {
    fn default() -> Self {
        Self::off()
    }
}
