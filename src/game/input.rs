//! Sequence-guarded input application
//!
//! The transport delivers input packets with no ordering guarantee; a packet
//! whose sequence number is not greater than the last accepted one must never
//! overwrite newer flags. Stale packets are routine, not errors.

use std::sync::Arc;

use tracing::debug;

use super::registry::RoomRegistry;
use super::{InputFlags, PlayerId};

/// Result of an input submission. `Stale` and `NotFound` are expected
/// outcomes under packet reordering and disconnect races, never faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Flags applied, sequence advanced
    Accepted,
    /// Sequence not greater than the last accepted one; discarded
    Stale,
    /// Unknown room or player; discarded
    NotFound,
}

/// Applies input submissions to player state under the sequence guard
pub struct InputSequencer {
    registry: Arc<RoomRegistry>,
}

impl InputSequencer {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Submit input flags for a player. Only `sequence > last_accepted_seq`
    /// replaces the pending flags; everything else is silently dropped.
    pub fn submit(
        &self,
        room_id: &str,
        player_id: PlayerId,
        flags: InputFlags,
        sequence: u32,
    ) -> SubmitOutcome {
        let Some(room) = self.registry.room(room_id) else {
            return SubmitOutcome::NotFound;
        };

        let mut room = room.lock();
        let Some(player) = room.players.get_mut(&player_id) else {
            return SubmitOutcome::NotFound;
        };

        if sequence > player.last_accepted_seq {
            player.inputs = flags;
            player.last_accepted_seq = sequence;
            SubmitOutcome::Accepted
        } else {
            debug!(
                room_id = %room_id,
                player_id = %player_id,
                sequence,
                last_accepted = player.last_accepted_seq,
                "Dropping stale input"
            );
            SubmitOutcome::Stale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use uuid::Uuid;

    fn setup() -> (Arc<RoomRegistry>, InputSequencer, PlayerId) {
        let registry = Arc::new(RoomRegistry::new(Arc::new(GameConfig::default())));
        registry.create_room("ROOMAA");
        let player_id = Uuid::new_v4();
        registry.add_player("ROOMAA", player_id, Some("alice"));
        let sequencer = InputSequencer::new(registry.clone());
        (registry, sequencer, player_id)
    }

    #[test]
    fn newer_sequence_is_accepted() {
        let (registry, sequencer, player_id) = setup();
        let flags = InputFlags::new(true, false, false);

        assert_eq!(
            sequencer.submit("ROOMAA", player_id, flags, 1),
            SubmitOutcome::Accepted
        );

        let room = registry.room("ROOMAA").unwrap();
        let room = room.lock();
        let player = &room.players[&player_id];
        assert_eq!(player.inputs, flags);
        assert_eq!(player.last_accepted_seq, 1);
    }

    #[test]
    fn out_of_order_submission_is_discarded() {
        let (registry, sequencer, player_id) = setup();
        let newer = InputFlags::new(true, false, false);
        let older = InputFlags::new(false, true, true);

        assert_eq!(
            sequencer.submit("ROOMAA", player_id, newer, 5),
            SubmitOutcome::Accepted
        );
        assert_eq!(
            sequencer.submit("ROOMAA", player_id, older, 3),
            SubmitOutcome::Stale
        );

        let room = registry.room("ROOMAA").unwrap();
        let room = room.lock();
        let player = &room.players[&player_id];
        assert_eq!(player.inputs, newer);
        assert_eq!(player.last_accepted_seq, 5);
    }

    #[test]
    fn duplicate_sequence_is_discarded() {
        let (_registry, sequencer, player_id) = setup();
        let flags = InputFlags::new(false, true, false);

        sequencer.submit("ROOMAA", player_id, flags, 2);
        assert_eq!(
            sequencer.submit("ROOMAA", player_id, flags, 2),
            SubmitOutcome::Stale
        );
    }

    #[test]
    fn sequence_is_monotonic_across_arbitrary_call_orders() {
        let (registry, sequencer, player_id) = setup();
        let mut last_seen = 0;

        for seq in [3u32, 1, 7, 7, 2, 9, 4, 9, 12, 6] {
            sequencer.submit("ROOMAA", player_id, InputFlags::default(), seq);
            let room = registry.room("ROOMAA").unwrap();
            let accepted = room.lock().players[&player_id].last_accepted_seq;
            assert!(accepted >= last_seen);
            last_seen = accepted;
        }
        assert_eq!(last_seen, 12);
    }

    #[test]
    fn unknown_room_and_player_are_noops() {
        let (_registry, sequencer, player_id) = setup();

        assert_eq!(
            sequencer.submit("NOROOM", player_id, InputFlags::default(), 1),
            SubmitOutcome::NotFound
        );
        assert_eq!(
            sequencer.submit("ROOMAA", Uuid::new_v4(), InputFlags::default(), 1),
            SubmitOutcome::NotFound
        );
    }
}
