use serde::{Deserialize, Serialize};

use crate::mode::Mode;

/// Participant connection identifier; unique to the connection and NOT the
/// person behind it.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantId(pub u32);

/// Synchronized-property update carrying the rig's mode.
///
/// The owner emits one of these per interaction; the hub delivers it to every
/// other participant, whose replica funnels it through the same mode setter
/// as a local interaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSync {
    pub mode: Mode,
}

/// Encode a sync message for transport
pub fn encode(msg: &ModeSync) -> bincode::Result<Vec<u8>> {
    bincode::serialize(msg)
}

/// Decode a sync message received from another participant
pub fn decode(frame: &[u8]) -> bincode::Result<ModeSync> {
    bincode::deserialize(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_sync_frame_is_one_byte() {
        let frame = encode(&ModeSync { mode: Mode::Chase }).unwrap();
        assert_eq!(frame, vec![3]);
        assert_eq!(decode(&frame).unwrap().mode, Mode::Chase);
    }

    #[test]
    fn malformed_frame_rejected() {
        assert!(decode(&[7]).is_err());
        assert!(decode(&[]).is_err());
    }
}
