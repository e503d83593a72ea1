//! The light rig behaviour: a four-mode cycle over an array of emissive
//! fixtures, with a self-rescheduling chase animation in the last mode.
//!
//! The controller holds no references to the platform. Every operation takes
//! the host capabilities as an argument, so the same state machine runs
//! identically under a world host, a headless sim, or a test fake.

use lightrig_interface::prelude::*;

/// Mode state machine and chase animation for one replica of the rig.
///
/// The mode is the only synchronized field and is mutated exclusively through
/// [`set_mode`](Self::set_mode), which stops any running chase and applies the
/// new mode's visuals as one step. The chase cursor and running flag are
/// ephemeral and never leave the local replica.
pub struct LightModeController {
    cfg: RigConfig,
    mode: Mode,
    /// Next fixture to light during a chase
    cursor: usize,
    /// Gates the self-rescheduling step; cleared by `stop_chase`
    running: bool,
}

impl LightModeController {
    /// Validates the configuration, then applies the initial `Off` visuals.
    ///
    /// Validation happens here rather than at first use: a bad palette or
    /// intensity is a deployment mistake, not a runtime condition.
    pub fn new(cfg: RigConfig, io: &mut dyn HostIo) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let mut controller = Self {
            cfg,
            mode: Mode::default(),
            cursor: 0,
            running: false,
        };
        controller.update_visuals(io);

        Ok(controller)
    }

    /// The current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the chase animation is live
    pub fn is_chase_running(&self) -> bool {
        self.running
    }

    /// "Use" interaction: claim ownership, advance the mode, propagate it.
    ///
    /// The broadcast happens exactly once per interaction and only for the
    /// local interaction path; remote updates come in through
    /// [`apply_remote`](Self::apply_remote) and are never re-broadcast.
    pub fn handle_use(&mut self, io: &mut dyn HostIo) {
        io.claim_ownership();

        let next = self.mode.advance();
        self.set_mode(next, io);

        io.broadcast_mode(next);
        log::debug!("Interaction advanced rig to {:?}", next);
    }

    /// Mode received from the network; same setter, no re-broadcast
    pub fn apply_remote(&mut self, mode: Mode, io: &mut dyn HostIo) {
        log::debug!("Remote update set rig to {:?}", mode);
        self.set_mode(mode, io);
    }

    /// Set the mode and refresh the visuals as one transactional step
    pub fn set_mode(&mut self, mode: Mode, io: &mut dyn HostIo) {
        self.mode = mode;
        self.update_visuals(io);
    }

    fn update_visuals(&mut self, io: &mut dyn HostIo) {
        // Idempotent; a chase that isn't running is unaffected
        self.stop_chase();

        let RigConfig {
            palette, intensity, ..
        } = self.cfg;

        match self.mode {
            Mode::Off => io.set_all(Emissive::off()),
            Mode::SolidA => io.set_all(Emissive::lit(palette[0].scale(intensity))),
            Mode::SolidB => io.set_all(Emissive::lit(palette[1].scale(intensity))),
            Mode::Chase => {
                io.set_all(Emissive::off());
                self.start_chase(io);
            }
        }
    }

    /// Reset the cursor, raise the running flag and take the first step now.
    ///
    /// An empty rig leaves the flag down and returns; there is nothing to
    /// light and nothing to schedule.
    pub fn start_chase(&mut self, io: &mut dyn HostIo) {
        if io.fixture_count() == 0 {
            return;
        }

        self.cursor = 0;
        self.running = true;
        self.chase_step(io);
    }

    /// Clear the running flag; the sole cancellation mechanism.
    ///
    /// A deferred step already in flight still fires once, sees the flag down
    /// and exits without touching any fixture.
    pub fn stop_chase(&mut self) {
        self.running = false;
    }

    /// One step of the chase: darken the previous fixture, light the current
    /// one, advance the cursor circularly and defer the next step.
    ///
    /// At most one deferred invocation is outstanding at any time, because
    /// only a completing step arms the next one.
    pub fn chase_step(&mut self, io: &mut dyn HostIo) {
        if !self.running {
            return;
        }

        let count = io.fixture_count();
        if count == 0 {
            self.running = false;
            return;
        }

        // On the very first step this wraps to the last fixture, which is
        // already dark; harmless, and it keeps the sequence circular.
        let previous = (self.cursor + count - 1) % count;
        io.set_fixture(FixtureId(previous as u32), Emissive::off());

        let chase_color = self.cfg.palette[2].scale(self.cfg.intensity);
        io.set_fixture(FixtureId(self.cursor as u32), Emissive::lit(chase_color));

        self.cursor = (self.cursor + 1) % count;
        io.defer_step(self.cfg.step_delay);
    }
}
