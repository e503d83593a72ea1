use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Virtual-time queue of deferred step invocations for one replica.
///
/// The behaviour's chase re-arms itself by deferring exactly one future
/// invocation per completed step; this queue is the host side of that
/// contract. Time only moves when the host loop advances it, which keeps
/// every run deterministic.
pub struct DeferQueue {
    pending: BinaryHeap<Reverse<Pending>>,
    /// Monotonic tie-breaker so same-instant entries fire in request order
    seq: u64,
    now: Duration,
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    due: Duration,
    seq: u64,
}

impl DeferQueue {
    pub fn new() -> Self {
        Self {
            pending: BinaryHeap::new(),
            seq: 0,
            now: Duration::ZERO,
        }
    }

    /// The queue's current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of invocations still pending
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Defer one invocation to `now + delay`
    pub fn defer(&mut self, delay: Duration) {
        let entry = Pending {
            due: self.now + delay,
            seq: self.seq,
        };
        self.seq += 1;
        self.pending.push(Reverse(entry));
    }

    /// Pop the earliest invocation due at or before `until`, moving the
    /// virtual clock to its due time so a re-arm from inside the dispatched
    /// step keeps the original cadence. Returns `None` once nothing is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<Duration> {
        let due = match self.pending.peek() {
            Some(Reverse(entry)) if entry.due <= until => entry.due,
            _ => return None,
        };

        self.pending.pop();
        self.now = due;
        Some(due)
    }

    /// Move the virtual clock forward to `until` after draining due entries
    pub fn settle(&mut self, until: Duration) {
        debug_assert!(until >= self.now);
        self.now = until;
    }
}

impl Default for DeferQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut q = DeferQueue::new();
        q.defer(Duration::from_millis(30));
        q.defer(Duration::from_millis(10));

        let horizon = Duration::from_millis(100);
        assert_eq!(q.pop_due(horizon), Some(Duration::from_millis(10)));
        assert_eq!(q.pop_due(horizon), Some(Duration::from_millis(30)));
        assert_eq!(q.pop_due(horizon), None);
    }

    #[test]
    fn nothing_fires_before_its_due_time() {
        let mut q = DeferQueue::new();
        q.defer(Duration::from_millis(50));
        assert_eq!(q.pop_due(Duration::from_millis(49)), None);
        assert_eq!(q.pending(), 1);
    }

    #[test]
    fn rearm_keeps_cadence() {
        let mut q = DeferQueue::new();
        q.defer(Duration::from_millis(50));

        // Dispatch at t=50, re-arm from inside the step
        let due = q.pop_due(Duration::from_millis(200)).unwrap();
        assert_eq!(due, Duration::from_millis(50));
        q.defer(Duration::from_millis(50));

        // The successor lands at 100, not at 50 + wherever the loop was
        assert_eq!(
            q.pop_due(Duration::from_millis(200)),
            Some(Duration::from_millis(100))
        );
    }

    #[test]
    fn same_instant_entries_all_fire() {
        let mut q = DeferQueue::new();
        q.defer(Duration::from_millis(10));
        q.defer(Duration::from_millis(10));
        let horizon = Duration::from_millis(10);
        assert_eq!(q.pop_due(horizon), Some(Duration::from_millis(10)));
        assert_eq!(q.pop_due(horizon), Some(Duration::from_millis(10)));
    }
}
