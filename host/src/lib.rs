//! Single-threaded cooperative host for the light rig behaviour.
//!
//! Stands in for the platform the behaviour was written against: an
//! in-memory fixture bank for the rendering primitive, a virtual-time queue
//! for delayed self-invocation, and a loopback hub for ownership transfer
//! and mode propagation between participants. Everything runs on one
//! host-driven tick; the only deferred work is the chase step the behaviour
//! re-arms itself.

pub mod fixtures;
pub mod hub;
pub mod schedule;
pub mod timing;
pub mod world;

pub use lightrig_interface as interface;

pub use world::World;
