use lightrig_interface::prelude::*;

/// In-memory bank of fixture render states; the host side of the
/// per-fixture emissive primitive.
pub struct FixtureBank {
    states: Vec<Emissive>,
}

impl FixtureBank {
    /// A bank of `count` fixtures, all dark
    pub fn new(count: usize) -> Self {
        Self {
            states: vec![Emissive::off(); count],
        }
    }

    /// Current state of every fixture, in rig order
    pub fn states(&self) -> &[Emissive] {
        &self.states
    }

    /// Indices of fixtures whose emission is currently enabled
    pub fn lit_indices(&self) -> Vec<usize> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, e)| e.enabled)
            .map(|(i, _)| i)
            .collect()
    }
}

impl FixtureIo for FixtureBank {
    fn fixture_count(&self) -> usize {
        self.states.len()
    }

    fn set_all(&mut self, state: Emissive) {
        self.states.fill(state);
    }

    fn set_fixture(&mut self, id: FixtureId, state: Emissive) {
        if let Some(slot) = self.states.get_mut(id.0 as usize) {
            *slot = state;
        }
    }

    fn fixture(&self, id: FixtureId) -> Option<Emissive> {
        self.states.get(id.0 as usize).copied()
    }
}
