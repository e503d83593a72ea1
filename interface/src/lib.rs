//! Shared vocabulary between the light rig behaviour and the host that runs it.
//!
//! The behaviour never talks to the platform directly; everything it needs
//! (fixture rendering, ownership transfer, mode propagation, deferred
//! invocation) is expressed here as data types and capability traits.

/// Rig configuration and fail-fast validation
pub mod config;

/// Fixture identity, color and emissive state
pub mod fixture;

/// Capability traits implemented by the host
pub mod io;

/// The synchronized lighting mode
pub mod mode;

/// Participant identity and the mode sync message
pub mod sync;

/// Convenience imports for the lazy
pub mod prelude {
    pub use crate::config::{ConfigError, RigConfig};
    pub use crate::fixture::{Emissive, FixtureId, Rgb};
    pub use crate::io::{DeferIo, FixtureIo, HostIo, SyncIo};
    pub use crate::mode::Mode;
    pub use crate::sync::{ModeSync, ParticipantId};
}
