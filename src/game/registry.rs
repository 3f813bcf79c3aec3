//! Registry of all active rooms
//!
//! Each room lives behind its own `Arc<Mutex<RoomState>>`: the tick task
//! holds the lock for a full step, and join/leave/input mutations take the
//! same lock, so a step never observes a partially mutated player map.
//! Rooms share no mutable state with each other.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use crate::config::GameConfig;

use super::room::RoomState;
use super::snapshot::{Snapshot, SnapshotBuilder};
use super::PlayerId;

/// Shared handle to one room's state
pub type SharedRoom = Arc<Mutex<RoomState>>;

/// Owns the mapping of room code to room state
pub struct RoomRegistry {
    rooms: DashMap<String, SharedRoom>,
    config: Arc<GameConfig>,
    snapshot_builder: SnapshotBuilder,
}

impl RoomRegistry {
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self {
            rooms: DashMap::new(),
            snapshot_builder: SnapshotBuilder::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &Arc<GameConfig> {
        &self.config
    }

    /// Allocate a room if absent. Re-creating an existing id is a no-op;
    /// returns whether a new room was created.
    pub fn create_room(&self, room_id: &str) -> bool {
        match self.rooms.entry(room_id.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(RoomState::new(room_id.to_string()))));
                info!(room_id = %room_id, "Room created");
                true
            }
        }
    }

    /// Discard a room and all contained players; no-op if absent
    pub fn remove_room(&self, room_id: &str) -> bool {
        let removed = self.rooms.remove(room_id).is_some();
        if removed {
            info!(room_id = %room_id, "Room removed");
        }
        removed
    }

    /// Insert a player at the next round-robin spawn point; no-op (false) if
    /// the room is absent
    pub fn add_player(&self, room_id: &str, player_id: PlayerId, username: Option<&str>) -> bool {
        let Some(room) = self.room(room_id) else {
            return false;
        };

        let mut room = room.lock();
        room.add_player(player_id, username, &self.config);
        info!(
            room_id = %room_id,
            player_id = %player_id,
            player_count = room.players.len(),
            "Player joined room"
        );
        true
    }

    /// Remove a player from a room; no-op if room or player is absent
    pub fn remove_player(&self, room_id: &str, player_id: PlayerId) -> bool {
        let Some(room) = self.room(room_id) else {
            return false;
        };

        let mut room = room.lock();
        let removed = room.remove_player(&player_id);
        if removed {
            info!(
                room_id = %room_id,
                player_id = %player_id,
                player_count = room.players.len(),
                "Player left room"
            );
        }
        removed
    }

    /// Current broadcast-ready view of a room; `None` when unknown
    pub fn snapshot(&self, room_id: &str) -> Option<Snapshot> {
        let room = self.room(room_id)?;
        let room = room.lock();
        Some(self.snapshot_builder.build(&room))
    }

    /// Shared handle to a room's state
    pub fn room(&self, room_id: &str) -> Option<SharedRoom> {
        self.rooms.get(room_id).map(|r| r.value().clone())
    }

    /// Player count for a room; `None` when unknown
    pub fn player_count(&self, room_id: &str) -> Option<usize> {
        self.room(room_id).map(|r| r.lock().players.len())
    }

    pub fn active_rooms(&self) -> usize {
        self.rooms.len()
    }

    pub fn total_players(&self) -> usize {
        self.rooms.iter().map(|r| r.value().lock().players.len()).sum()
    }

    /// Whether a room code is currently allocated (taken check for code
    /// generation)
    pub fn contains(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }
}
