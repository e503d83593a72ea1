use serde::{Deserialize, Serialize};

/// The lighting mode, the only synchronized datum of the rig.
///
/// Serializes as its wire index so sync frames stay a single byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Mode {
    /// All fixtures dark, emission disabled
    Off,
    /// All fixtures lit with the first palette color
    SolidA,
    /// All fixtures lit with the second palette color
    SolidB,
    /// One fixture at a time, advancing circularly
    Chase,
}

impl Mode {
    /// Number of modes in the cycle
    pub const COUNT: u8 = 4;

    /// Wire index, 0..=3
    pub fn index(self) -> u8 {
        match self {
            Mode::Off => 0,
            Mode::SolidA => 1,
            Mode::SolidB => 2,
            Mode::Chase => 3,
        }
    }

    /// Inverse of [`index`](Self::index); `None` for out-of-range values
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Mode::Off),
            1 => Some(Mode::SolidA),
            2 => Some(Mode::SolidB),
            3 => Some(Mode::Chase),
            _ => None,
        }
    }

    /// The successor in the interaction cycle; `(index + 1) % 4`, no guards
    pub fn advance(self) -> Self {
        Self::from_index((self.index() + 1) % Self::COUNT)
            .unwrap_or(Mode::Off)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Off
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> u8 {
        mode.index()
    }
}

impl TryFrom<u8> for Mode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Mode::from_index(value).ok_or_else(|| format!("Invalid mode index {}", value))
    }
}
