//! Capability traits the host implements for the behaviour.
//!
//! The platform's networking, rendering and scheduling are opaque services;
//! the behaviour receives them as injected objects so it can be exercised
//! against fakes in tests and against the real thing in a world host.

use std::time::Duration;

use crate::fixture::{Emissive, FixtureId};
use crate::mode::Mode;

/// Per-fixture emissive rendering primitive
pub trait FixtureIo {
    /// Number of fixtures in the rig
    fn fixture_count(&self) -> usize;

    /// Set every fixture to the same emissive state
    fn set_all(&mut self, state: Emissive);

    /// Set a single fixture; out-of-range ids are ignored
    fn set_fixture(&mut self, id: FixtureId, state: Emissive);

    /// Read a fixture's current state; `None` for out-of-range ids
    fn fixture(&self, id: FixtureId) -> Option<Emissive>;
}

/// Network ownership transfer and synchronized-property propagation
pub trait SyncIo {
    /// Reassign ownership of the prop to the acting participant
    fn claim_ownership(&mut self);

    /// Fire-and-forget request to propagate the mode to all other
    /// participants. Delivery and ordering belong to the host.
    fn broadcast_mode(&mut self, mode: Mode);
}

/// Delayed self-invocation scheduling
pub trait DeferIo {
    /// Request exactly one future invocation of the behaviour's chase step
    fn defer_step(&mut self, delay: Duration);
}

/// The full set of host capabilities, as one object.
///
/// Blanket-implemented, so any host IO view that provides the three parts
/// can be handed to the behaviour as `&mut dyn HostIo`.
pub trait HostIo: FixtureIo + SyncIo + DeferIo {}

impl<T: FixtureIo + SyncIo + DeferIo> HostIo for T {}
