use std::time::{Duration, Instant};

/// Wall-clock frame timing for hosts that run in real time.
///
/// The world itself advances on virtual time; this clock only paces the
/// outer loop and feeds it measured deltas.
pub struct Timing {
    init: Instant,
    last_frame: Instant,
    delta: Duration,
    elapsed: Duration,
}

impl Timing {
    pub fn init() -> Self {
        let init = Instant::now();
        Self {
            last_frame: init,
            init,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Begin the frame, as far as this clock is concerned.
    pub fn frame(&mut self) {
        let frame_start = Instant::now();
        self.delta = frame_start - self.last_frame;
        self.elapsed = frame_start - self.init;
        self.last_frame = frame_start;
    }

    /// Time since the previous frame
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
