use ahash::HashMap;
use rand::prelude::*;

use lightrig_interface::prelude::*;

/// Loopback network hub: ownership registry plus store-and-forward delivery
/// of sync frames between participants on the same host.
///
/// Delivery is reliable and in queue order; those guarantees belong here, not
/// to the behaviour, which only ever fires a broadcast and forgets it.
pub struct SyncHub {
    /// Join-ordered roster
    roster: Vec<ParticipantId>,
    inboxes: HashMap<ParticipantId, Vec<Vec<u8>>>,
    /// Frames queued for delivery on the next flush, tagged with their author
    outbox: Vec<(ParticipantId, Vec<u8>)>,
    owner: Option<ParticipantId>,
    rng: StdRng,
}

impl SyncHub {
    pub fn new() -> Self {
        Self {
            roster: vec![],
            inboxes: HashMap::default(),
            outbox: vec![],
            owner: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic hub for tests and reproducible sims
    pub fn new_seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    /// Admit a new participant, assigning a fresh connection id
    pub fn join(&mut self) -> ParticipantId {
        let id = loop {
            let candidate = ParticipantId(self.rng.gen());
            if !self.inboxes.contains_key(&candidate) {
                break candidate;
            }
        };

        self.roster.push(id);
        self.inboxes.insert(id, vec![]);
        log::info!("Participant {:?} joined", id);
        id
    }

    /// Drop a participant and everything queued for it
    pub fn leave(&mut self, id: ParticipantId) {
        self.roster.retain(|p| *p != id);
        self.inboxes.remove(&id);
        self.outbox.retain(|(author, _)| *author != id);
        if self.owner == Some(id) {
            self.owner = None;
        }
        log::info!("Participant {:?} left", id);
    }

    /// Current participants, in join order
    pub fn roster(&self) -> &[ParticipantId] {
        &self.roster
    }

    /// The participant whose updates are authoritative, if any has claimed
    pub fn owner(&self) -> Option<ParticipantId> {
        self.owner
    }

    /// Reassign ownership; the last claimant wins
    pub fn claim(&mut self, id: ParticipantId) {
        if self.owner != Some(id) {
            log::debug!("Ownership transferred to {:?}", id);
        }
        self.owner = Some(id);
    }

    /// Queue a frame for broadcast to every other participant
    pub fn queue_broadcast(&mut self, author: ParticipantId, frame: Vec<u8>) {
        self.outbox.push((author, frame));
    }

    /// Deliver all queued frames; authors never receive their own
    pub fn flush(&mut self) {
        for (author, frame) in self.outbox.drain(..) {
            for (id, inbox) in self.inboxes.iter_mut() {
                if *id != author {
                    inbox.push(frame.clone());
                }
            }
        }
    }

    /// Take everything delivered to the given participant
    pub fn drain_inbox(&mut self, id: ParticipantId) -> Vec<Vec<u8>> {
        self.inboxes
            .get_mut(&id)
            .map(std::mem::take)
            .unwrap_or_default()
    }
}

impl Default for SyncHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_skips_the_author() {
        let mut hub = SyncHub::new_seeded(7);
        let a = hub.join();
        let b = hub.join();
        let c = hub.join();

        hub.queue_broadcast(a, vec![1]);
        hub.flush();

        assert!(hub.drain_inbox(a).is_empty());
        assert_eq!(hub.drain_inbox(b), vec![vec![1]]);
        assert_eq!(hub.drain_inbox(c), vec![vec![1]]);
    }

    #[test]
    fn drain_empties_the_inbox() {
        let mut hub = SyncHub::new_seeded(7);
        let a = hub.join();
        let b = hub.join();

        hub.queue_broadcast(a, vec![2]);
        hub.flush();
        assert_eq!(hub.drain_inbox(b).len(), 1);
        assert!(hub.drain_inbox(b).is_empty());
    }

    #[test]
    fn last_claimant_owns() {
        let mut hub = SyncHub::new_seeded(7);
        let a = hub.join();
        let b = hub.join();

        assert_eq!(hub.owner(), None);
        hub.claim(a);
        hub.claim(b);
        assert_eq!(hub.owner(), Some(b));
    }

    #[test]
    fn leaving_owner_clears_ownership() {
        let mut hub = SyncHub::new_seeded(7);
        let a = hub.join();
        hub.claim(a);
        hub.leave(a);
        assert_eq!(hub.owner(), None);
        assert!(hub.roster().is_empty());
    }
}
