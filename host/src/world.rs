use std::time::Duration;

use anyhow::{Context, Result};

use lightrig_behavior::LightModeController;
use lightrig_interface::{prelude::*, sync};

use crate::fixtures::FixtureBank;
use crate::hub::SyncHub;
use crate::schedule::DeferQueue;

/// One participant's view of the shared prop: their fixture replica, their
/// deferred-step queue and their copy of the behaviour.
struct Replica {
    id: ParticipantId,
    fixtures: FixtureBank,
    timers: DeferQueue,
    controller: LightModeController,
}

/// The capability surface handed to one replica's controller for the
/// duration of a dispatch.
struct ReplicaIo<'a> {
    fixtures: &'a mut FixtureBank,
    timers: &'a mut DeferQueue,
    hub: &'a mut SyncHub,
    id: ParticipantId,
}

impl FixtureIo for ReplicaIo<'_> {
    fn fixture_count(&self) -> usize {
        self.fixtures.fixture_count()
    }

    fn set_all(&mut self, state: Emissive) {
        self.fixtures.set_all(state);
    }

    fn set_fixture(&mut self, id: FixtureId, state: Emissive) {
        self.fixtures.set_fixture(id, state);
    }

    fn fixture(&self, id: FixtureId) -> Option<Emissive> {
        self.fixtures.fixture(id)
    }
}

impl SyncIo for ReplicaIo<'_> {
    fn claim_ownership(&mut self) {
        self.hub.claim(self.id);
    }

    fn broadcast_mode(&mut self, mode: Mode) {
        match sync::encode(&ModeSync { mode }) {
            Ok(frame) => self.hub.queue_broadcast(self.id, frame),
            // Fire-and-forget: nothing upstream can act on this
            Err(e) => log::error!("Failed to encode mode sync: {}", e),
        }
    }
}

impl DeferIo for ReplicaIo<'_> {
    fn defer_step(&mut self, delay: Duration) {
        self.timers.defer(delay);
    }
}

/// A world hosting one shared light rig and any number of participants.
///
/// Single-threaded and cooperative: all behaviour code runs inside
/// [`tick`](Self::tick) or [`use_prop`](Self::use_prop), and the only
/// deferred work is the chase step each replica re-arms for itself.
pub struct World {
    cfg: RigConfig,
    hub: SyncHub,
    replicas: Vec<Replica>,
    /// Virtual time shared by every replica's queue
    now: Duration,
}

impl World {
    /// Validate the config and spin up `participants` replicas, each with
    /// its own fixture bank and controller, all starting dark.
    pub fn new(cfg: RigConfig, participants: usize) -> Result<Self> {
        Self::with_hub(cfg, participants, SyncHub::new())
    }

    /// Same, but over a seeded hub for reproducible runs
    pub fn new_seeded(cfg: RigConfig, participants: usize, seed: u64) -> Result<Self> {
        Self::with_hub(cfg, participants, SyncHub::new_seeded(seed))
    }

    fn with_hub(cfg: RigConfig, participants: usize, mut hub: SyncHub) -> Result<Self> {
        cfg.validate().context("Rejecting light rig config")?;

        let mut replicas = Vec::with_capacity(participants);
        for _ in 0..participants {
            let id = hub.join();
            let mut fixtures = FixtureBank::new(cfg.fixture_count as usize);
            let mut timers = DeferQueue::new();

            let mut io = ReplicaIo {
                fixtures: &mut fixtures,
                timers: &mut timers,
                hub: &mut hub,
                id,
            };
            let controller = LightModeController::new(cfg.clone(), &mut io)?;

            replicas.push(Replica {
                id,
                fixtures,
                timers,
                controller,
            });
        }

        Ok(Self {
            cfg,
            hub,
            replicas,
            now: Duration::ZERO,
        })
    }

    /// The rig configuration this world was built from
    pub fn config(&self) -> &RigConfig {
        &self.cfg
    }

    /// Number of participants in the world
    pub fn participants(&self) -> usize {
        self.replicas.len()
    }

    /// Current owner of the prop, if anyone has interacted yet
    pub fn owner(&self) -> Option<ParticipantId> {
        self.hub.owner()
    }

    /// The given participant's current mode
    pub fn mode(&self, participant: usize) -> Mode {
        self.replicas[participant].controller.mode()
    }

    /// The given participant's fixture replica
    pub fn fixtures(&self, participant: usize) -> &FixtureBank {
        &self.replicas[participant].fixtures
    }

    /// The given participant "uses" the prop: ownership moves to them, the
    /// mode advances locally and a sync frame is queued for everyone else.
    pub fn use_prop(&mut self, participant: usize) -> Result<()> {
        let replica = self
            .replicas
            .get_mut(participant)
            .with_context(|| format!("No participant at index {}", participant))?;

        let mut io = ReplicaIo {
            fixtures: &mut replica.fixtures,
            timers: &mut replica.timers,
            hub: &mut self.hub,
            id: replica.id,
        };
        replica.controller.handle_use(&mut io);

        Ok(())
    }

    /// Advance the world by `dt`: run every deferred chase step that comes
    /// due, then deliver queued sync frames and apply them on each replica.
    pub fn tick(&mut self, dt: Duration) {
        self.now += dt;

        // Chase steps first; each dispatched step may re-arm exactly one
        // successor, which fires within this same tick if it is due.
        for replica in &mut self.replicas {
            while replica.timers.pop_due(self.now).is_some() {
                let mut io = ReplicaIo {
                    fixtures: &mut replica.fixtures,
                    timers: &mut replica.timers,
                    hub: &mut self.hub,
                    id: replica.id,
                };
                replica.controller.chase_step(&mut io);
            }
            replica.timers.settle(self.now);
        }

        // Then the network: flush queued broadcasts and funnel every
        // received mode through the same setter a local interaction uses.
        self.hub.flush();
        for replica in &mut self.replicas {
            for frame in self.hub.drain_inbox(replica.id) {
                let msg = match sync::decode(&frame) {
                    Ok(msg) => msg,
                    Err(e) => {
                        log::error!("Discarding malformed sync frame: {}", e);
                        continue;
                    }
                };

                let mut io = ReplicaIo {
                    fixtures: &mut replica.fixtures,
                    timers: &mut replica.timers,
                    hub: &mut self.hub,
                    id: replica.id,
                };
                replica.controller.apply_remote(msg.mode, &mut io);
            }
        }
    }
}
